//! Watchlist endpoint, served from the refresh cache.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::quote_routes::CACHE_POLICY;
use crate::AppState;

pub fn watchlist_routes() -> Router<AppState> {
    Router::new().route("/api/watchlist", get(get_watchlist))
}

async fn get_watchlist(State(state): State<AppState>) -> Response {
    match state.cache.watchlist().await {
        Some(board) => ([(header::CACHE_CONTROL, CACHE_POLICY)], Json(board)).into_response(),
        None => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "watchlist unavailable: upstream has not answered yet" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_watchlist, state_with, EmptySource};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_watchlist_served_from_cache() {
        let state = state_with(Arc::new(EmptySource));
        state.cache.store_watchlist(sample_watchlist()).await;

        let response = get_watchlist(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["items"][0]["ticker"], "AAPL");
        // Wire spelling is camelCase, matching the upstream contract
        assert!(body["items"][0].get("marketCap").is_some());
    }

    #[tokio::test]
    async fn test_watchlist_bad_gateway_when_cold() {
        let state = state_with(Arc::new(EmptySource));
        let response = get_watchlist(State(state)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
