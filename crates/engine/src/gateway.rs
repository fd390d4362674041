//! Seams between the form logic and the remote collaborators.
//!
//! The controller and the address pipeline only see these traits, so tests
//! can substitute in-memory fakes for the HTTP clients.

use async_trait::async_trait;
use groundwork_api::{ApiError, GeocodingClient, ProspectClient};
use groundwork_types::{GeocodePlace, ProspectId};
use serde_json::Value;

/// Submission and management calls against the prospect backend.
#[async_trait]
pub trait ProspectGateway: Send + Sync {
    async fn submit_contact(&self, payload: &Value) -> Result<(), ApiError>;
    async fn create(&self, payload: &Value) -> Result<Value, ApiError>;
    async fn update(&self, id: &ProspectId, payload: &Value) -> Result<Value, ApiError>;
    async fn fetch(&self, id: &ProspectId) -> Result<Value, ApiError>;
    async fn list(&self) -> Result<Vec<Value>, ApiError>;
    async fn delete(&self, id: &ProspectId) -> Result<(), ApiError>;
}

/// Free-text address search.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeocodePlace>, ApiError>;
}

#[async_trait]
impl ProspectGateway for ProspectClient {
    async fn submit_contact(&self, payload: &Value) -> Result<(), ApiError> {
        ProspectClient::submit_contact(self, payload).await
    }

    async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        ProspectClient::create(self, payload).await
    }

    async fn update(&self, id: &ProspectId, payload: &Value) -> Result<Value, ApiError> {
        ProspectClient::update(self, id, payload).await
    }

    async fn fetch(&self, id: &ProspectId) -> Result<Value, ApiError> {
        ProspectClient::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Value>, ApiError> {
        ProspectClient::list(self).await
    }

    async fn delete(&self, id: &ProspectId) -> Result<(), ApiError> {
        ProspectClient::delete(self, id).await
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodePlace>, ApiError> {
        GeocodingClient::search(self, query).await
    }
}
