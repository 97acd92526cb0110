use std::sync::Arc;

use axum::{response::Response, routing::get, Router};
use serde_json::json;

use crate::{main_lib::AppState, models::ok};

async fn healthz() -> Response {
    ok(json!({ "status": "ok" }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(healthz))
}
