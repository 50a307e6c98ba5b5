//! # EcoCycle Infrastructure
//!
//! Concrete implementations of the ports defined in `ewaste-core`:
//! the backend HTTP client, local storage, and geocoding.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No optional dependencies
//! - `auth` - JWT session token inspection
//! - `rate-limit` - Geocoder throttling via governor

pub mod geocoding;
pub mod http;
pub mod images;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use geocoding::{NominatimConfig, NominatimGeocoder};
pub use http::{HttpApiClient, HttpClientConfig};
pub use storage::{InMemoryStore, JsonFileStore};

#[cfg(feature = "auth")]
pub use auth::JwtTokenInspector;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
