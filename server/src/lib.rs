//! In-memory CRUD service for a single integer-keyed resource type.
//!
//! # Design
//! - `ResourceStore` owns every record; handlers reach it only through the
//!   `AppState` they are given, never through a global.
//! - Handlers map store outcomes to status codes: 400 for malformed or
//!   conflicting input, 404 for absent ids, 200 otherwise.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use config::ServerConfig;
pub use error::{AppError, StoreError};
pub use model::{Resource, ResourceId};
pub use store::{InMemoryStore, ResourceStore};

/// Shared handler state: the one store instance for the process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
}

/// Router over a fresh, empty `InMemoryStore`.
pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryStore::new()))
}

pub fn app_with_store(store: Arc<dyn ResourceStore>) -> Router {
    Router::new()
        .route("/resources", get(handlers::list_resources))
        .route("/resources/create", post(handlers::create_resource))
        .route(
            "/resources/{id}",
            get(handlers::get_resource)
                .put(handlers::update_resource)
                .delete(handlers::delete_resource),
        )
        .with_state(AppState { store })
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
