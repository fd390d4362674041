//! Nominatim search client used by address autocomplete.

use groundwork_types::GeocodePlace;
use groundwork_util::SiteConfig;
use reqwest::{Client, header};
use tracing::debug;

use crate::{ApiError, build_http_client, read_body, user_agent};

/// Results are restricted to this ISO country code.
pub const GEOCODE_COUNTRY_SCOPE: &str = "us";
/// Maximum number of results requested per lookup.
pub const GEOCODE_RESULT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl GeocodingClient {
    pub fn new(config: &SiteConfig) -> Result<Self, ApiError> {
        Self::with_base_url(&config.geocoder_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: build_http_client()?,
            user_agent: user_agent(),
        })
    }

    /// `GET /search?format=json&q={query}&addressdetails=1&limit=5&countrycodes=us`
    ///
    /// Returns places in provider order.
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodePlace>, ApiError> {
        let url = format!("{}/search", self.base_url);
        let limit = GEOCODE_RESULT_LIMIT.to_string();
        debug!(%url, query_len = query.len(), "geocoding lookup");

        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
                ("countrycodes", GEOCODE_COUNTRY_SCOPE),
            ])
            .send()
            .await?;
        let text = read_body(response).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
