use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RequestStatus;
use crate::error::DomainError;

/// Largest quantity the backend accepts for a single request.
pub const MAX_QUANTITY: u32 = 1000;

/// Largest proof image the backend accepts.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Physical condition of the device being handed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    #[default]
    Working,
    Damaged,
    Dead,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Working, Condition::Damaged, Condition::Dead];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "WORKING",
            Self::Damaged => "DAMAGED",
            Self::Dead => "DEAD",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WORKING" => Ok(Self::Working),
            "DAMAGED" => Ok(Self::Damaged),
            "DEAD" => Ok(Self::Dead),
            _ => Err(DomainError::validation("Invalid condition value")),
        }
    }
}

/// Device category picked in the first wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    #[default]
    Laptop,
    Mobile,
    Tablet,
    Desktop,
    Monitor,
    Printer,
    Battery,
    /// Free-form type, spelled out in the draft's custom field.
    Other,
}

impl DeviceType {
    pub const ALL: [DeviceType; 8] = [
        DeviceType::Laptop,
        DeviceType::Mobile,
        DeviceType::Tablet,
        DeviceType::Desktop,
        DeviceType::Monitor,
        DeviceType::Printer,
        DeviceType::Battery,
        DeviceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Laptop => "Laptop",
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
            Self::Monitor => "Monitor",
            Self::Printer => "Printer",
            Self::Battery => "Battery",
            Self::Other => "Other",
        }
    }

    /// Exact (case-insensitive) match against the known categories.
    pub fn known(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| *t != Self::Other && t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pickup request as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRequest {
    pub id: i64,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub condition: Condition,
    pub quantity: u32,
    pub pickup_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_remarks: Option<String>,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Uploaded proof image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size and type limits enforced by the backend, checked before upload.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bytes.is_empty() {
            return Err(DomainError::validation("Image upload is required"));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::validation("Image size must be up to 5 MB"));
        }
        if !self.content_type.starts_with("image/") {
            return Err(DomainError::validation("Only image files are allowed"));
        }
        Ok(())
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Editable form state shared by the submit wizard and the update form.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDraft {
    pub device_type: DeviceType,
    pub custom_device_type: String,
    pub brand: String,
    pub model: String,
    pub condition: Condition,
    pub quantity: u32,
    pub pickup_address: String,
    pub additional_remarks: String,
    pub image: Option<ImageUpload>,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            device_type: DeviceType::Laptop,
            custom_device_type: String::new(),
            brand: String::new(),
            model: String::new(),
            condition: Condition::Working,
            quantity: 1,
            pickup_address: String::new(),
            additional_remarks: String::new(),
            image: None,
        }
    }
}

impl RequestDraft {
    /// Pre-fill the form from an existing request, mapping unknown device
    /// types onto `Other` with the custom field populated.
    pub fn from_request(request: &PickupRequest) -> Self {
        let (device_type, custom_device_type) = match DeviceType::known(&request.device_type) {
            Some(known) => (known, String::new()),
            None => (DeviceType::Other, request.device_type.clone()),
        };

        Self {
            device_type,
            custom_device_type,
            brand: request.brand.clone(),
            model: request.model.clone(),
            condition: request.condition,
            quantity: request.quantity.max(1),
            pickup_address: request.pickup_address.clone(),
            additional_remarks: request.additional_remarks.clone().unwrap_or_default(),
            image: None,
        }
    }

    /// Device type string sent to the backend.
    pub fn resolved_device_type(&self) -> String {
        match self.device_type {
            DeviceType::Other => self.custom_device_type.trim().to_string(),
            known => known.as_str().to_string(),
        }
    }

    pub(crate) fn validate_device(&self) -> Result<(), DomainError> {
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("Brand is required."));
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::validation("Model is required."));
        }
        if self.device_type == DeviceType::Other && self.custom_device_type.trim().is_empty() {
            return Err(DomainError::validation("Please specify the device type."));
        }
        Ok(())
    }

    pub(crate) fn validate_pickup(&self) -> Result<(), DomainError> {
        if self.pickup_address.trim().is_empty() {
            return Err(DomainError::validation("Pickup address is required."));
        }
        Ok(())
    }

    fn validate_quantity(&self) -> Result<(), DomainError> {
        if !(1..=MAX_QUANTITY).contains(&self.quantity) {
            return Err(DomainError::validation("Quantity must be between 1 and 1000"));
        }
        Ok(())
    }

    /// Normalise the draft into the multipart payload of a new request.
    /// The image is mandatory here.
    pub fn to_submission(&self) -> Result<RequestSubmission, DomainError> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| DomainError::validation("Proof image is required."))?;
        image.validate()?;
        self.build(Some(image))
    }

    /// Normalise the draft into the multipart payload of an update.
    /// The image is optional and only replaces the stored one when present.
    pub fn to_update(&self) -> Result<RequestSubmission, DomainError> {
        if let Some(image) = &self.image {
            image.validate()?;
        }
        self.build(self.image.clone())
    }

    fn build(&self, image: Option<ImageUpload>) -> Result<RequestSubmission, DomainError> {
        self.validate_device()?;
        self.validate_pickup()?;
        self.validate_quantity()?;

        let remarks = self.additional_remarks.trim();
        Ok(RequestSubmission {
            device_type: self.resolved_device_type(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            condition: self.condition,
            quantity: self.quantity,
            pickup_address: self.pickup_address.trim().to_string(),
            additional_remarks: (!remarks.is_empty()).then(|| remarks.to_string()),
            image,
        })
    }
}

/// Validated, trimmed request fields ready to be sent as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSubmission {
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub condition: Condition,
    pub quantity: u32,
    pub pickup_address: String,
    pub additional_remarks: Option<String>,
    pub image: Option<ImageUpload>,
}
