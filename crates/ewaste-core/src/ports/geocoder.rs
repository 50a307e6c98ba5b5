//! Geocoding port used by the pickup address picker.

use async_trait::async_trait;

use crate::domain::Place;

/// Forward and reverse geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Free-text search; at most a handful of best matches.
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;

    /// Address for a coordinate, `None` if the service has no name for it.
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<String>, GeocodeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("No locations found.")]
    NoResults,

    #[error("Location search failed. Please try again.")]
    Transport(String),
}
