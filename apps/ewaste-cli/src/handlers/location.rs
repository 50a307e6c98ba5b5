//! Pickup address picker backed by the geocoder.

use serde::Serialize;

use ewaste_core::DomainError;
use ewaste_core::domain::{Place, coordinates_label};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickedAddress {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

pub async fn search(state: &AppState, query: &str) -> AppResult<Vec<Place>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(DomainError::validation("Enter a location to search.").into());
    }
    Ok(state.geocoder.search(query).await?)
}

/// Address for a picked point. Falls back to the coordinates on any failure.
pub async fn reverse(state: &AppState, lat: f64, lon: f64) -> PickedAddress {
    let address = match state.geocoder.reverse(lat, lon).await {
        Ok(Some(name)) => name,
        Ok(None) => coordinates_label(lat, lon),
        Err(e) => {
            tracing::debug!(error = %e, "Reverse geocoding failed");
            coordinates_label(lat, lon)
        }
    };
    PickedAddress { lat, lon, address }
}

/// Where the map opens before anything is picked.
pub fn default_location() -> Place {
    Place::default_location()
}
