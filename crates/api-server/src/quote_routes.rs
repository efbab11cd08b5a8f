//! Quick-overview quote board endpoint, served from the refresh cache.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::AppState;

/// Mirrors the upstream's edge-cache policy.
pub(crate) const CACHE_POLICY: &str = "s-maxage=60, stale-while-revalidate=300";

pub fn quote_routes() -> Router<AppState> {
    Router::new().route("/api/quotes", get(get_quotes))
}

async fn get_quotes(State(state): State<AppState>) -> Response {
    match state.cache.quotes().await {
        Some(board) => ([(header::CACHE_CONTROL, CACHE_POLICY)], Json(board)).into_response(),
        None => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "quotes unavailable: upstream has not answered yet" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_quotes, state_with, EmptySource};
    use std::sync::Arc;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_quotes_served_with_cache_policy() {
        let state = state_with(Arc::new(EmptySource));
        state.cache.store_quotes(sample_quotes()).await;

        let response = get_quotes(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            CACHE_POLICY
        );

        let body = body_json(response).await;
        assert_eq!(body["asOf"], "2025-08-07");
        assert_eq!(body["items"][0]["name"], "S&P 500");
    }

    #[tokio::test]
    async fn test_quotes_bad_gateway_when_cold() {
        let state = state_with(Arc::new(EmptySource));

        let response = get_quotes(State(state)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("upstream"));
    }
}
