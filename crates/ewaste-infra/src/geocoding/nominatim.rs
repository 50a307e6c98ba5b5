//! OpenStreetMap Nominatim geocoder.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use ewaste_core::domain::Place;
use ewaste_core::ports::{GeocodeError, Geocoder, RateLimiter};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "EcoCycle-EWasteManagement/1.0";

const SEARCH_LIMIT: &str = "5";
const RATE_LIMIT_KEY: &str = "nominatim";

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim rejects requests without an identifying agent.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NominatimConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("EWASTE_NOMINATIM_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string()),
            user_agent: std::env::var("EWASTE_GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    place_id: i64,
    display_name: String,
    lat: String,
    lon: String,
}

impl SearchHit {
    fn into_place(self) -> Option<Place> {
        Some(Place {
            id: self.place_id,
            display_name: self.display_name,
            lat: self.lat.parse().ok()?,
            lon: self.lon.parse().ok()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    #[serde(default)]
    display_name: Option<String>,
}

/// Nominatim client, optionally throttled through a `RateLimiter`.
pub struct NominatimGeocoder {
    http: Client,
    config: NominatimConfig,
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            http,
            config,
            limiter: None,
        })
    }

    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Waits until the limiter admits one more call.
    async fn throttle(&self) -> Result<(), GeocodeError> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };
        loop {
            let result = limiter
                .check(RATE_LIMIT_KEY)
                .await
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;
            if result.allowed {
                return Ok(());
            }
            tracing::debug!(wait_ms = result.reset_after.as_millis() as u64, "Geocoder throttled");
            tokio::time::sleep(result.reset_after).await;
        }
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GeocodeError> {
        self.throttle().await?;
        let response = self
            .http
            .get(self.url(endpoint))
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let hits: Vec<SearchHit> = self
            .fetch(
                "search",
                &[("format", "jsonv2"), ("q", query), ("limit", SEARCH_LIMIT)],
            )
            .await?;

        let places: Vec<Place> = hits.into_iter().filter_map(SearchHit::into_place).collect();
        if places.is_empty() {
            return Err(GeocodeError::NoResults);
        }
        Ok(places)
    }

    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<String>, GeocodeError> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        let hit: ReverseHit = self
            .fetch(
                "reverse",
                &[("format", "jsonv2"), ("lat", &lat), ("lon", &lon)],
            )
            .await?;
        Ok(hit.display_name.filter(|name| !name.trim().is_empty()))
    }
}
