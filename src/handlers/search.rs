//! Search handler
//!
//! Parses the agent's search request and returns the aggregated hits

use super::AppState;
use crate::types::{SearchRequest, SearchResponse};
use crate::{Error, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

pub async fn search(State(state): State<AppState>, body: Bytes) -> Response {
    match handle_search(&state, &body).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("[SEARCH] Error in search endpoint: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}

async fn handle_search(state: &AppState, body: &[u8]) -> Result<SearchResponse> {
    let request: SearchRequest = serde_json::from_slice(body)
        .map_err(|e| Error::InvalidRequest(format!("Malformed search request: {e}")))?;

    let filter = request.filter_text();
    info!("[SEARCH] Query: \"{}\"", request.query);

    let results = state
        .aggregator()
        .search(&request.query, filter.as_deref())
        .await?;

    Ok(SearchResponse::ok(results))
}
