pub mod search;
pub mod status;

use crate::aggregator::Aggregator;
use crate::sources::build_sources;
use crate::{Config, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared request state, built once at startup
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: Config, aggregator: Aggregator) -> Self {
        Self {
            config: Arc::new(config),
            aggregator,
        }
    }

    /// Wire up the sources enabled by `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let sources = build_sources(&config.sources)?;
        let aggregator = Aggregator::new(sources, config.search.max_results);
        tracing::info!(
            "[HANDLER] Sources enabled: {}",
            aggregator.source_names().join(", ")
        );
        Ok(Self::new(config, aggregator))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::service_info))
        .route("/health", get(status::health))
        .route("/search", post(search::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
