//! Brand resource routes.

use super::{record_id, RecordDates};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::page::{outcome_response, record_path, Page, Redirects};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use rusqlite::Connection;
use serde_json::json;
use storefront_core::{
    CreateBrand, LifecycleManager, ListParams, ListingService, ResourceKind,
    SqliteBrandStore, UpdateBrand,
};

const KIND: ResourceKind = ResourceKind::Brand;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brands", get(index).post(store))
        .route("/brands/create", get(create))
        .route(
            "/brands/:brand",
            get(show).put(update).patch(update).delete(destroy),
        )
        .route("/brands/:brand/edit", get(edit))
}

fn lifecycle(conn: &Connection) -> LifecycleManager<SqliteBrandStore<'_>> {
    LifecycleManager::new(SqliteBrandStore::new(conn))
}

async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Page, ApiError> {
    let listing = state
        .with_conn(move |conn| Ok(ListingService::new(SqliteBrandStore::new(conn)).list(&params)?))
        .await?;

    Ok(Page::resource(
        KIND,
        "Index",
        json!({ "brands": listing.items, "filters": listing.filters }),
    ))
}

async fn create() -> Page {
    Page::resource(KIND, "Form", json!({ "brand": null }))
}

async fn store(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateBrand>,
) -> Result<Response, ApiError> {
    let payload = payload.trimmed();
    payload.validate()?;
    let outcome = state
        .with_conn(move |conn| Ok(lifecycle(conn).create(&payload)))
        .await?;

    Ok(outcome_response(
        outcome,
        StatusCode::CREATED,
        Redirects::new(KIND, "/brands/create"),
        |brand| Some(brand.id),
    ))
}

async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Page, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let brand = state
        .with_conn(move |conn| Ok(lifecycle(conn).read(id)?))
        .await?;
    let dates = RecordDates::new(brand.created_at, brand.updated_at);

    Ok(Page::resource(
        KIND,
        "Show",
        json!({
            "brand": brand,
            "created_on": dates.created_on,
            "days_since_update": dates.days_since_update,
        }),
    ))
}

async fn edit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Page, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let brand = state
        .with_conn(move |conn| Ok(lifecycle(conn).read(id)?))
        .await?;
    Ok(Page::resource(KIND, "Form", json!({ "brand": brand })))
}

async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateBrand>,
) -> Result<Response, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let payload = payload.trimmed();
    payload.validate()?;
    let outcome = state
        .with_conn(move |conn| Ok(lifecycle(conn).update(id, &payload)))
        .await?;

    Ok(outcome_response(
        outcome,
        StatusCode::OK,
        Redirects::new(KIND, format!("{}/edit", record_path(KIND, id))),
        |brand| Some(brand.id),
    ))
}

async fn destroy(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let outcome = state
        .with_conn(move |conn| Ok(lifecycle(conn).delete(id)))
        .await?;

    Ok(outcome_response(
        outcome,
        StatusCode::OK,
        Redirects::new(KIND, record_path(KIND, id)),
        |_| None,
    ))
}
