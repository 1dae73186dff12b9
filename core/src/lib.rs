//! Blocking API client for the resource service.
//!
//! # Overview
//! Builds `HttpRequest` values, sends them through a `Transport`, and hands
//! back `HttpResponse` values carrying the status and body text. Typed
//! parsing of those responses is available but optional.
//!
//! # Design
//! - `ResourceClient` holds only `base_url` and its transport.
//! - Each CRUD operation is split into `build_*` (produces a request), an
//!   issuing method (one round trip), and `parse_*` (interprets a response),
//!   so the I/O boundary stays explicit.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod logging;
pub mod transport;
pub mod types;

pub use client::ResourceClient;
pub use error::{ApiError, ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Resource, ResourceId};
