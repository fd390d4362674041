//! Client for the prospect endpoints of the business backend.

use groundwork_types::ProspectId;
use groundwork_util::SiteConfig;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, header};
use serde_json::Value;
use tracing::{debug, info};

use crate::{ApiError, build_http_client, read_body, user_agent};

const CONTACT_PATH: &str = "/prospect/contact";
const MANAGE_PATH: &str = "/prospect/manage";

/// Thin wrapper around a configured `reqwest::Client` for the prospect API.
#[derive(Debug, Clone)]
pub struct ProspectClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl ProspectClient {
    /// Construct a client for the configured server URL.
    pub fn new(config: &SiteConfig) -> Result<Self, ApiError> {
        Self::with_base_url(&config.server_url)
    }

    /// Construct a client for an explicit base URL (no trailing slash).
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: build_http_client()?,
            user_agent: user_agent(),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, %method, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// `POST /prospect/contact` with a public contact or quote submission.
    pub async fn submit_contact(&self, payload: &Value) -> Result<(), ApiError> {
        let response = self.request(Method::POST, CONTACT_PATH).json(payload).send().await?;
        read_body(response).await?;
        info!("contact submission accepted");
        Ok(())
    }

    /// `GET /prospect/manage`.
    ///
    /// Accepts either a bare JSON array or an object wrapping the array
    /// (e.g. `{ "data": [...] }`).
    pub async fn list(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.request(Method::GET, MANAGE_PATH).send().await?;
        let text = read_body(response).await?;
        match parse_json(&text)? {
            Value::Array(rows) => Ok(rows),
            Value::Object(map) => map
                .into_iter()
                .find_map(|(_, value)| match value {
                    Value::Array(rows) => Some(rows),
                    _ => None,
                })
                .ok_or_else(|| ApiError::Shape("object without a prospect array".into())),
            Value::Null => Ok(Vec::new()),
            other => Err(ApiError::Shape(format!("expected an array, got {other}"))),
        }
    }

    /// `GET /prospect/manage/{id}`.
    pub async fn get(&self, id: &ProspectId) -> Result<Value, ApiError> {
        let response = self.request(Method::GET, &item_path(id)).send().await?;
        let text = read_body(response).await?;
        parse_json(&text)
    }

    /// `POST /prospect/manage`.
    pub async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        let response = self.request(Method::POST, MANAGE_PATH).json(payload).send().await?;
        let text = read_body(response).await?;
        parse_json(&text)
    }

    /// `PUT /prospect/manage/{id}`.
    pub async fn update(&self, id: &ProspectId, payload: &Value) -> Result<Value, ApiError> {
        let response = self.request(Method::PUT, &item_path(id)).json(payload).send().await?;
        let text = read_body(response).await?;
        parse_json(&text)
    }

    /// `DELETE /prospect/manage/{id}`.
    pub async fn delete(&self, id: &ProspectId) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, &item_path(id)).send().await?;
        read_body(response).await?;
        info!(%id, "prospect deleted");
        Ok(())
    }
}

fn item_path(id: &ProspectId) -> String {
    format!("{}/{}", MANAGE_PATH, utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC))
}

/// Empty bodies parse as `null`.
fn parse_json(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_escapes_identifier() {
        assert_eq!(item_path(&ProspectId::new("abc123")), "/prospect/manage/abc123");
        assert_eq!(item_path(&ProspectId::new("a/b c")), "/prospect/manage/a%2Fb%20c");
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_json("  ").unwrap(), Value::Null);
        assert!(parse_json("{oops").is_err());
    }
}
