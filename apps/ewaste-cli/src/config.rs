//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use ewaste_infra::images::DEFAULT_THUMBNAIL_CONCURRENCY;
use ewaste_infra::{HttpClientConfig, NominatimConfig};

#[cfg(feature = "rate-limit")]
use ewaste_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: HttpClientConfig,
    pub storage_path: PathBuf,
    pub nominatim: NominatimConfig,
    #[cfg(feature = "rate-limit")]
    pub geocoder_rate: RateLimitConfig,
    pub thumbnail_concurrency: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api: HttpClientConfig::from_env(),
            storage_path: env::var("EWASTE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Self::default_storage_path()),
            nominatim: NominatimConfig::from_env(),
            #[cfg(feature = "rate-limit")]
            geocoder_rate: RateLimitConfig::from_env(),
            thumbnail_concurrency: env::var("EWASTE_THUMBNAIL_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_THUMBNAIL_CONCURRENCY),
        }
    }

    /// `<data_local_dir>/ewaste/storage.json`, or the working directory when
    /// the platform has no data dir.
    fn default_storage_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ewaste")
            .join("storage.json")
    }

    pub fn with_api_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        self
    }
}
