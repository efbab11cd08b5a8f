//! Exchange session status endpoint.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use market_hours::{evaluate_all, SessionView};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusResponse {
    pub as_of: DateTime<Utc>,
    pub viewer_zone: String,
    pub items: Vec<SessionView>,
}

pub fn market_routes() -> Router<AppState> {
    Router::new().route("/api/markets", get(get_markets))
}

/// Session status for every configured exchange, evaluated at request time.
///
/// Each request is one tick: the evaluator runs fresh against the immutable
/// registry and nothing is cached between calls.
async fn get_markets(State(state): State<AppState>) -> Json<MarketStatusResponse> {
    let now = Utc::now();
    Json(MarketStatusResponse {
        as_of: now,
        viewer_zone: state.viewer_zone.name().to_string(),
        items: evaluate_all(now, &state.registry, state.viewer_zone),
    })
}
