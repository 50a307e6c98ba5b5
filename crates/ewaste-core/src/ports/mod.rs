//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod api;
mod auth;
mod geocoder;
mod rate_limit;
mod storage;

pub use api::{
    ApiError, AuthApi, AuthGrant, PasswordChange, PickupRequestApi, ProfileApi, Registration,
    RequestImage, UNREACHABLE_MESSAGE,
};
pub use auth::{AuthError, TokenClaims, TokenInspector};
pub use geocoder::{GeocodeError, Geocoder};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use storage::{LocalStore, StoreError};
