//! HTTP request builder, issuer and response parser for the resource API.
//!
//! # Design
//! Each CRUD operation has a `build_*` method that produces an
//! `HttpRequest` without touching the network, and an issuing method that
//! sends it through the client's `Transport` and hands back the raw
//! `HttpResponse`. Issuing never interprets the status; the `parse_*`
//! methods do that on request. There are no retries and no caching: every
//! issuing call is one fresh round trip.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ApiError, ClientError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Resource, ResourceId};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Client for the resource API.
///
/// Holds the base URL and a transport; carries no state between calls.
#[derive(Debug, Clone)]
pub struct ResourceClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ResourceClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T> ResourceClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: ResourceId) -> String {
        format!("{}/resources/{id}", self.base_url)
    }

    pub fn build_create(&self, resource: &Resource) -> Result<HttpRequest, ClientError> {
        Ok(self.build_create_raw(serde_json::to_string(resource)?))
    }

    /// Create request carrying `body` exactly as given.
    pub fn build_create_raw(&self, body: impl Into<String>) -> HttpRequest {
        HttpRequest::new(HttpMethod::Post, format!("{}/resources/create", self.base_url))
            .header(JSON_CONTENT_TYPE.0, JSON_CONTENT_TYPE.1)
            .body(body)
    }

    pub fn build_get(&self, id: ResourceId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.item_url(id))
    }

    /// List request; non-empty `params` become `?k1=v1&k2=v2` in key order,
    /// each key and value form-urlencoded.
    pub fn build_list(&self, params: &BTreeMap<String, String>) -> HttpRequest {
        let mut url = format!("{}/resources", self.base_url);
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        HttpRequest::new(HttpMethod::Get, url)
    }

    pub fn build_update(&self, id: ResourceId, resource: &Resource) -> Result<HttpRequest, ClientError> {
        Ok(self.build_update_raw(id, serde_json::to_string(resource)?))
    }

    pub fn build_update_raw(&self, id: ResourceId, body: impl Into<String>) -> HttpRequest {
        HttpRequest::new(HttpMethod::Put, self.item_url(id))
            .header(JSON_CONTENT_TYPE.0, JSON_CONTENT_TYPE.1)
            .body(body)
    }

    pub fn build_delete(&self, id: ResourceId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Resource, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Resource>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Create, update and delete answer 200 with an empty body.
    pub fn parse_ack(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

impl<T: Transport> ResourceClient<T> {
    /// Issue `request` as-is and return the response for any status.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn create(&self, resource: &Resource) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_create(resource)?)
    }

    pub fn create_raw(&self, body: impl Into<String>) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_create_raw(body))
    }

    pub fn get(&self, id: ResourceId) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_get(id))
    }

    pub fn list(&self, params: &BTreeMap<String, String>) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_list(params))
    }

    pub fn update(&self, id: ResourceId, resource: &Resource) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_update(id, resource)?)
    }

    pub fn update_raw(&self, id: ResourceId, body: impl Into<String>) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_update_raw(id, body))
    }

    pub fn delete(&self, id: ResourceId) -> Result<HttpResponse, ClientError> {
        self.send(&self.build_delete(id))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        400 => Err(ApiError::BadRequest {
            body: response.body.clone(),
        }),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
