//! Geocoding adapters.

mod nominatim;

pub use nominatim::{NominatimConfig, NominatimGeocoder};
