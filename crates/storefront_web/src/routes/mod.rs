//! Route table.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Router;
use serde::Serialize;
use storefront_core::db::now_epoch_ms;
use storefront_core::{RecordId, ResourceKind};
use storefront_core::util::date::{days_between, format_date, DateStyle};

mod brands;
mod home;
mod products;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(brands::router())
        .merge(products::router())
}

/// Resolves a `{brand}`/`{product}` path segment. A malformed id names no
/// record, so it is reported as not found.
fn record_id(kind: ResourceKind, raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse_str(raw).map_err(|_| ApiError::UnknownRecord(kind))
}

/// Display fields shown next to a record on its detail page.
#[derive(Debug, Serialize)]
struct RecordDates {
    created_on: Option<String>,
    days_since_update: i64,
}

impl RecordDates {
    fn new(created_at: i64, updated_at: i64) -> Self {
        Self {
            created_on: format_date(created_at, DateStyle::Long),
            days_since_update: days_between(updated_at, now_epoch_ms()),
        }
    }
}

/// `{ id, name }` pair for select inputs.
#[derive(Debug, Serialize)]
struct SelectOption {
    id: String,
    name: String,
}
