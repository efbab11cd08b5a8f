use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/ping", get(ping))
}

async fn ping() -> Json<Value> {
    Json(json!({ "ok": true }))
}
