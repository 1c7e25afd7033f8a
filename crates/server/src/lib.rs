//! Publish gateway: accepts `{id, data}` payloads from key-holding clients
//! and relays them into a GitHub repository via the contents API, so clients
//! can publish without holding repository credentials.
//!
//! The binary lives in `main.rs`; the router is assembled here so the
//! integration tests can run the real service on a local listener.

pub mod config;
mod cors;
pub mod error;
pub mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use config::{AppConfig, UPSTREAM_TIMEOUT};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Shared upstream HTTP client; connection reuse only, no coordination.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }
}

/// Assemble the gateway router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/publish", post(routes::publish::publish))
        .layer(DefaultBodyLimit::max(pagegate_api::MAX_PUBLISH_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors::cors))
        .with_state(state)
}
