use serde::{Deserialize, Serialize};

/// A geocoded place offered by the address picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    /// Map centre used before the user has searched for anything.
    pub fn default_location() -> Self {
        Self {
            id: 0,
            display_name: "Default Location (India)".to_string(),
            lat: 20.5937,
            lon: 78.9629,
        }
    }
}

/// Label used when a coordinate cannot be resolved to an address.
pub fn coordinates_label(lat: f64, lon: f64) -> String {
    format!("Lat: {lat:.6}, Lon: {lon:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_label_uses_six_decimals() {
        assert_eq!(coordinates_label(12.9716, 77.5946), "Lat: 12.971600, Lon: 77.594600");
    }
}
