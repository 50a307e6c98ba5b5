use super::RequestStatus;

/// Visual state of one step in the progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    pub status: RequestStatus,
    pub state: StepState,
}

impl TimelineStep {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    pub fn detail(&self) -> &'static str {
        match self.status {
            RequestStatus::Submitted => "Your request has been created.",
            RequestStatus::PickupScheduled => "Pickup partner has been assigned.",
            RequestStatus::PickedUp => "Device has been collected from your address.",
            RequestStatus::Recycled => "Recycling process is completed.",
            RequestStatus::Rejected => "Request could not be processed.",
            RequestStatus::Other(_) => "Status updated with a custom value.",
        }
    }
}

/// Fixed four-step progress list for a request's current status.
///
/// The last step is `RECYCLED`, replaced by `REJECTED` for rejected requests
/// and by `OTHER` for unrecognised ones. A literal `OTHER` status keeps the
/// normal list. A status not present in the list has no position, so every
/// step stays pending.
pub fn timeline(current: &RequestStatus) -> Vec<TimelineStep> {
    let last = match current {
        RequestStatus::Rejected => RequestStatus::Rejected,
        status if !status.is_recognised() => RequestStatus::Other(RequestStatus::OTHER.to_string()),
        _ => RequestStatus::Recycled,
    };
    let steps = [
        RequestStatus::Submitted,
        RequestStatus::PickupScheduled,
        RequestStatus::PickedUp,
        last,
    ];

    let current_index = match current {
        RequestStatus::Other(_) => None,
        status => steps.iter().position(|s| s == status),
    };

    steps
        .into_iter()
        .enumerate()
        .map(|(index, status)| {
            let state = match current_index {
                Some(current) if current > index => StepState::Done,
                Some(current) if current == index => StepState::Active,
                _ => StepState::Pending,
            };
            TimelineStep { status, state }
        })
        .collect()
}
