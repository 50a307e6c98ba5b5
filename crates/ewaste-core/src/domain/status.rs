use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-managed lifecycle status of a pickup request.
///
/// Any value outside the known set lands in `Other`, which keeps the raw
/// string so it can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Submitted,
    PickupScheduled,
    PickedUp,
    Recycled,
    Rejected,
    Other(String),
}

impl RequestStatus {
    /// Statuses a user can filter the request list by.
    pub const FILTERABLE: [RequestStatus; 5] = [
        RequestStatus::Submitted,
        RequestStatus::PickupScheduled,
        RequestStatus::PickedUp,
        RequestStatus::Recycled,
        RequestStatus::Rejected,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::PickupScheduled => "PICKUP_SCHEDULED",
            Self::PickedUp => "PICKED_UP",
            Self::Recycled => "RECYCLED",
            Self::Rejected => "REJECTED",
            Self::Other(raw) => raw,
        }
    }

    /// Wire value the backend uses for a status outside the normal flow.
    pub const OTHER: &'static str = "OTHER";

    /// Known statuses plus the literal `OTHER` value have labels and details.
    pub fn is_recognised(&self) -> bool {
        !matches!(self, Self::Other(raw) if raw != Self::OTHER)
    }

    /// Long label used on the tracking page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::PickupScheduled => "Pickup Scheduled",
            Self::PickedUp => "Picked Up",
            Self::Recycled => "Recycled",
            Self::Rejected => "Rejected",
            Self::Other(_) => "Other",
        }
    }

    /// Compact label used on list badges and matched by the list search.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::PickupScheduled => "Scheduled",
            other => other.label(),
        }
    }

    /// One-line description of what the status means for the user, `None`
    /// for unrecognised values.
    pub fn detail(&self) -> Option<&'static str> {
        if !self.is_recognised() {
            return None;
        }
        Some(match self {
            Self::Submitted => {
                "Your request has been received and is awaiting assignment to a pickup partner."
            }
            Self::PickupScheduled => "A pickup partner has been scheduled to collect your items.",
            Self::PickedUp => {
                "The items have been collected and are being transported to the recycling facility."
            }
            Self::Recycled => {
                "Great news! Your electronic waste has been successfully processed and recycled."
            }
            Self::Rejected => {
                "Unfortunately, this request could not be accepted. Please review the details."
            }
            Self::Other(_) => "The status of your request has been updated.",
        })
    }

    /// Only freshly submitted requests may still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl FromStr for RequestStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SUBMITTED" => Self::Submitted,
            "PICKUP_SCHEDULED" => Self::PickupScheduled,
            "PICKED_UP" => Self::PickedUp,
            "RECYCLED" => Self::Recycled,
            "REJECTED" => Self::Rejected,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(status) = raw.parse::<RequestStatus>();
        Ok(status)
    }
}

/// Status filter of the request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: &RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    /// `ALL` (any case) selects everything; anything else filters by equality.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let Ok(status) = s.to_ascii_uppercase().parse::<RequestStatus>();
        Ok(Self::Only(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_keeps_raw_value() {
        let status: RequestStatus = serde_json::from_str("\"IN_REVIEW\"").unwrap();
        assert_eq!(status, RequestStatus::Other("IN_REVIEW".to_string()));
        assert_eq!(status.label(), "Other");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"IN_REVIEW\"");
    }

    #[test]
    fn test_known_statuses_round_trip_labels() {
        let status: RequestStatus = serde_json::from_str("\"PICKUP_SCHEDULED\"").unwrap();
        assert_eq!(status, RequestStatus::PickupScheduled);
        assert_eq!(status.label(), "Pickup Scheduled");
        assert_eq!(status.short_label(), "Scheduled");
    }

    #[test]
    fn test_detail_only_for_recognised_statuses() {
        assert_eq!(
            RequestStatus::PickedUp.detail(),
            Some("The items have been collected and are being transported to the recycling facility.")
        );
        assert!(RequestStatus::Other("OTHER".into()).is_recognised());
        assert_eq!(
            RequestStatus::Other("OTHER".into()).detail(),
            Some("The status of your request has been updated.")
        );
        assert!(!RequestStatus::Other("ON_HOLD".into()).is_recognised());
        assert_eq!(RequestStatus::Other("ON_HOLD".into()).detail(), None);
    }

    #[test]
    fn test_only_submitted_is_editable() {
        assert!(RequestStatus::Submitted.is_editable());
        assert!(!RequestStatus::PickedUp.is_editable());
        assert!(!RequestStatus::Other("SUBMITTED_LATE".into()).is_editable());
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "recycled".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(RequestStatus::Recycled)
        );
    }
}
