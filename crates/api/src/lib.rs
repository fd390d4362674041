//! Groundwork API client utilities.
//!
//! This crate provides lightweight clients for the two remote collaborators
//! the application talks to:
//!
//! - [`ProspectClient`]: the business backend that receives contact/quote
//!   submissions and exposes prospect management (list, show, create,
//!   update, delete)
//! - [`GeocodingClient`]: a Nominatim-compatible search endpoint used for
//!   address autocomplete
//!
//! Both clients pre-configure default headers, a request timeout and a
//! consistent User-Agent, and build requests against a base URL that was
//! validated by [`groundwork_util::SiteConfig`].
//!
//! # Example
//!
//! ```ignore
//! use groundwork_api::ProspectClient;
//! use groundwork_util::SiteConfig;
//!
//! async fn list() -> anyhow::Result<()> {
//!     let client = ProspectClient::new(&SiteConfig::from_env()?)?;
//!     for prospect in client.list().await? {
//!         println!("{prospect}");
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod geocoding;
mod prospects;

use std::env;
use std::time::Duration;

use reqwest::{Client, header};
use tracing::debug;

pub use error::ApiError;
pub use geocoding::{GEOCODE_COUNTRY_SCOPE, GEOCODE_RESULT_LIMIT, GeocodingClient};
pub use prospects::ProspectClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn user_agent() -> String {
    format!("groundwork/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS)
}

/// Build a `reqwest::Client` that sends and accepts JSON.
fn build_http_client() -> Result<Client, ApiError> {
    let mut default_headers = header::HeaderMap::new();
    default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(default_headers)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(ApiError::Client)
}

/// Read a response body, mapping non-2xx statuses to [`ApiError::Status`].
///
/// A body that cannot be read is a [`ApiError::Network`] failure unless the
/// status already reported an error.
async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(error) if status.is_success() => return Err(ApiError::Network(error)),
        Err(error) => {
            debug!(%error, "failed to read error response body");
            String::new()
        }
    };
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: groundwork_util::redact_contact_details(text.trim()),
        });
    }
    Ok(text)
}
