//! Typed errors and their HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::model::ResourceId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("resource {0} not found")]
    NotFound(ResourceId),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Errors a handler can answer with. Each maps to exactly one status code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("resource {0} not found")]
    NotFound(ResourceId),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

// Any body rejection (missing content type, bad syntax, wrong field types)
// is a plain 400 rather than axum's 415/422 split.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let response = AppError::from(StoreError::NotFound(3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::BadRequest("id mismatch".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
