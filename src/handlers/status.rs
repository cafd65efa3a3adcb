//! Root and health endpoints

use super::AppState;
use crate::types::ServiceInfo;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const SERVICE_NAME: &str = "Crypto News API";
pub const SERVICE_VERSION: &str = "2.0";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(describe(&state))
}

pub fn describe(state: &AppState) -> ServiceInfo {
    let sources = &state.config().sources;

    let mut data_sources = BTreeMap::new();
    data_sources.insert(
        "coingecko".to_string(),
        "✅ Active (Trending coins & prices)".to_string(),
    );
    data_sources.insert(
        "cryptopanic".to_string(),
        source_status(sources.cryptopanic_enabled()),
    );
    data_sources.insert("newsapi".to_string(), source_status(sources.newsapi_enabled()));

    let mut endpoints = BTreeMap::new();
    endpoints.insert("/search".to_string(), "POST - Main search endpoint".to_string());
    endpoints.insert("/health".to_string(), "GET - Health check".to_string());

    ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        status: "running".to_string(),
        data_sources,
        endpoints,
    }
}

fn source_status(enabled: bool) -> String {
    if enabled {
        "✅ Active".to_string()
    } else {
        "⚠️ No API key".to_string()
    }
}
