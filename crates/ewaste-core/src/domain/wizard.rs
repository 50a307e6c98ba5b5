use super::{RequestDraft, RequestSubmission};
use crate::error::DomainError;

/// Steps of the linear submit wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Device = 1,
    Pickup = 2,
    Confirm = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Device, WizardStep::Pickup, WizardStep::Confirm];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::Pickup => "Pickup",
            Self::Confirm => "Confirm",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Device => "Item details",
            Self::Pickup => "Location & Notes",
            Self::Confirm => "Submit request",
        }
    }

    /// Header line shown above the step's fields.
    pub fn heading(&self) -> String {
        format!(
            "Step {}/{} {}: {}",
            self.number(),
            Self::ALL.len(),
            self.title(),
            self.hint()
        )
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Device => Some(Self::Pickup),
            Self::Pickup => Some(Self::Confirm),
            Self::Confirm => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::Device => None,
            Self::Pickup => Some(Self::Device),
            Self::Confirm => Some(Self::Pickup),
        }
    }
}

/// Submit wizard: a draft plus the step the user is on.
///
/// Advancing only validates the fields owned by the current step; the full
/// payload, image included, is checked on submit.
#[derive(Debug, Clone, Default)]
pub struct RequestWizard {
    step: WizardStep,
    pub draft: RequestDraft,
}

impl RequestWizard {
    pub fn new(draft: RequestDraft) -> Self {
        Self {
            step: WizardStep::Device,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn validate_step(&self, step: WizardStep) -> Result<(), DomainError> {
        match step {
            WizardStep::Device => self.draft.validate_device(),
            WizardStep::Pickup => self.draft.validate_pickup(),
            WizardStep::Confirm => Ok(()),
        }
    }

    /// Move forward one step if the current one is complete.
    /// Returns the step now shown; on the last step this is a no-op.
    pub fn advance(&mut self) -> Result<WizardStep, DomainError> {
        let current = self.step();
        self.validate_step(current)?;
        let next = current.next().unwrap_or(current);
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        let current = self.step();
        let previous = current.previous().unwrap_or(current);
        self.step = previous;
        previous
    }

    /// Build the payload; only allowed from the confirm step.
    pub fn submit(&self) -> Result<RequestSubmission, DomainError> {
        if self.step() != WizardStep::Confirm {
            return Err(DomainError::validation(format!(
                "Complete the {} step first.",
                self.step().title()
            )));
        }
        self.draft.to_submission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageUpload;

    #[test]
    fn test_cannot_leave_device_step_without_brand_and_model() {
        let mut wizard = RequestWizard::new(RequestDraft::default());
        assert_eq!(
            wizard.advance().unwrap_err(),
            DomainError::validation("Brand is required.")
        );
        assert_eq!(wizard.step(), WizardStep::Device);

        wizard.draft.brand = "Samsung".into();
        assert_eq!(
            wizard.advance().unwrap_err(),
            DomainError::validation("Model is required.")
        );
        assert_eq!(wizard.step(), WizardStep::Device);

        wizard.draft.model = "Galaxy S10".into();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Pickup);
    }

    #[test]
    fn test_pickup_step_requires_address() {
        let mut wizard = RequestWizard::new(RequestDraft {
            brand: "Apple".into(),
            model: "iPad".into(),
            ..RequestDraft::default()
        });
        wizard.advance().unwrap();
        assert_eq!(
            wizard.advance().unwrap_err(),
            DomainError::validation("Pickup address is required.")
        );
        wizard.draft.pickup_address = "Kochi".into();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Confirm);
    }

    #[test]
    fn test_step_headings() {
        let headings: Vec<String> = WizardStep::ALL.iter().map(WizardStep::heading).collect();
        assert_eq!(
            headings,
            vec![
                "Step 1/3 Device: Item details",
                "Step 2/3 Pickup: Location & Notes",
                "Step 3/3 Confirm: Submit request",
            ]
        );
    }

    #[test]
    fn test_back_never_fails() {
        let mut wizard = RequestWizard::new(RequestDraft::default());
        assert_eq!(wizard.back(), WizardStep::Device);
    }

    #[test]
    fn test_submit_from_confirm_requires_image() {
        let mut wizard = RequestWizard::new(RequestDraft {
            brand: "Apple".into(),
            model: "iPad".into(),
            pickup_address: "Kochi".into(),
            ..RequestDraft::default()
        });
        assert!(wizard.submit().is_err());
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(
            wizard.submit().unwrap_err(),
            DomainError::validation("Proof image is required.")
        );

        wizard.draft.image = Some(ImageUpload::new("a.jpg", "image/jpeg", vec![1, 2, 3]));
        assert_eq!(wizard.submit().unwrap().brand, "Apple");
    }
}
