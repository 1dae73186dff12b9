//! Error types for the resource API client.
//!
//! # Design
//! Two layers. `ClientError` covers a round trip that never produced an
//! HTTP status at all (connection refused, timeouts, encode failures).
//! `ApiError` is only produced when a caller asks to interpret a response,
//! and splits 400 and 404 out of the other non-2xx statuses.

use thiserror::Error;

/// The request could not be carried to the server and back.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request itself was unusable (bad URL, bad header); nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("response body could not be read: {0}")]
    Body(String),
}

/// Errors from issuing a request. HTTP statuses are never errors here.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors returned by `ResourceClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 400: malformed body or id mismatch.
    #[error("bad request: {body}")]
    BadRequest { body: String },

    /// The server returned 404: the resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
