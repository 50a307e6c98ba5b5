//! Application state - the ports every handler works against.

use std::sync::Arc;

use ewaste_core::ports::{
    AuthApi, AuthError, Geocoder, LocalStore, PickupRequestApi, ProfileApi, TokenClaims,
    TokenInspector,
};
use ewaste_infra::{HttpApiClient, JsonFileStore, NominatimGeocoder};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthApi>,
    pub profiles: Arc<dyn ProfileApi>,
    pub requests: Arc<dyn PickupRequestApi>,
    pub store: Arc<dyn LocalStore>,
    pub geocoder: Arc<dyn Geocoder>,
    pub tokens: Arc<dyn TokenInspector>,
    pub thumbnail_concurrency: usize,
}

/// Accepts every token as-is; the backend decides.
#[cfg_attr(feature = "auth", allow(dead_code))]
pub struct OpaqueTokenInspector;

impl TokenInspector for OpaqueTokenInspector {
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingAuth);
        }
        Ok(TokenClaims::default())
    }
}

impl AppState {
    /// Build the application state with the configured adapters.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let api = Arc::new(HttpApiClient::new(config.api.clone())?);
        tracing::debug!(base_url = api.base_url(), "Backend client ready");

        let store = JsonFileStore::new(config.storage_path.clone());
        tracing::debug!(path = %store.path().display(), "Using local storage file");

        let geocoder = NominatimGeocoder::new(config.nominatim.clone())?;
        #[cfg(feature = "rate-limit")]
        let geocoder = geocoder.with_rate_limiter(Arc::new(ewaste_infra::InMemoryRateLimiter::new(
            config.geocoder_rate.clone(),
        )));

        #[cfg(feature = "auth")]
        let tokens: Arc<dyn TokenInspector> = Arc::new(ewaste_infra::JwtTokenInspector::new());
        #[cfg(not(feature = "auth"))]
        let tokens: Arc<dyn TokenInspector> = Arc::new(OpaqueTokenInspector);

        Ok(Self {
            auth: api.clone(),
            profiles: api.clone(),
            requests: api,
            store: Arc::new(store),
            geocoder: Arc::new(geocoder),
            tokens,
            thumbnail_concurrency: config.thumbnail_concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_inspector() {
        assert!(OpaqueTokenInspector.inspect("anything").is_ok());
        assert_eq!(
            OpaqueTokenInspector.inspect("").unwrap_err(),
            AuthError::MissingAuth
        );
    }
}
