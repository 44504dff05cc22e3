use crate::page::Page;
use crate::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use storefront_core::{core_version, ping};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
}

async fn welcome() -> Page {
    Page::new(
        "Welcome",
        json!({
            "app_version": core_version(),
            "links": { "brands": "/brands", "products": "/products" },
        }),
    )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "ping": ping() }))
}
