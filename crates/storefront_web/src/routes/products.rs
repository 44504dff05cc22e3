//! Product resource routes and the product name suggestion API.

use super::{record_id, RecordDates, SelectOption};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::page::{outcome_response, record_path, Page, Redirects};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{json, Value};
use storefront_core::util::image::{placeholder_image_url, PLACEHOLDER_SIZE};
use storefront_core::{
    brand_exists, CreateProduct, LifecycleManager, ListParams, ListQuery, ListingService,
    RecordId, ResourceKind, SqliteBrandStore, SqliteProductStore, UpdateProduct,
    ValidationError,
};

const KIND: ResourceKind = ResourceKind::Product;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(store))
        .route("/products/create", get(create))
        .route(
            "/products/:product",
            get(show).put(update).patch(update).delete(destroy),
        )
        .route("/products/:product/edit", get(edit))
        .route("/api/products/suggestions", get(suggestions))
}

#[derive(Debug, Default, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
}

fn lifecycle(conn: &Connection) -> LifecycleManager<SqliteProductStore<'_>> {
    LifecycleManager::new(SqliteProductStore::new(conn))
}

fn ensure_brand(conn: &Connection, brand_id: RecordId) -> Result<(), ApiError> {
    if brand_exists(conn, brand_id)? {
        Ok(())
    } else {
        Err(ValidationError::UnknownBrand(brand_id).into())
    }
}

fn brand_options(conn: &Connection) -> Result<Vec<SelectOption>, ApiError> {
    let brands = ListingService::new(SqliteBrandStore::new(conn)).run(&ListQuery::default())?;
    Ok(brands
        .into_iter()
        .map(|brand| SelectOption {
            id: brand.id.to_string(),
            name: brand.name,
        })
        .collect())
}

async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Page, ApiError> {
    let listing = state
        .with_conn(move |conn| {
            Ok(ListingService::new(SqliteProductStore::new(conn)).list(&params)?)
        })
        .await?;

    Ok(Page::resource(
        KIND,
        "Index",
        json!({ "products": listing.items, "filters": listing.filters }),
    ))
}

async fn create(State(state): State<AppState>) -> Result<Page, ApiError> {
    let brands = state.with_conn(brand_options).await?;
    Ok(Page::resource(
        KIND,
        "Form",
        json!({ "product": null, "brands": brands }),
    ))
}

async fn store(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateProduct>,
) -> Result<Response, ApiError> {
    let payload = payload.trimmed();
    payload.validate()?;
    let outcome = state
        .with_conn(move |conn| {
            ensure_brand(conn, payload.brand_id)?;
            Ok(lifecycle(conn).create(&payload))
        })
        .await?;

    Ok(outcome_response(
        outcome,
        StatusCode::CREATED,
        Redirects::new(KIND, "/products/create"),
        |product| Some(product.product.id),
    ))
}

async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Page, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let record = state
        .with_conn(move |conn| Ok(lifecycle(conn).read(id)?))
        .await?;
    let dates = RecordDates::new(record.product.created_at, record.product.updated_at);
    let image = record
        .product
        .image_url
        .clone()
        .unwrap_or_else(|| placeholder_image_url(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));

    Ok(Page::resource(
        KIND,
        "Show",
        json!({
            "product": record,
            "image": image,
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
    let (record, brands) = state
        .with_conn(move |conn| {
            let record = lifecycle(conn).read(id)?;
            Ok((record, brand_options(conn)?))
        })
        .await?;

    Ok(Page::resource(
        KIND,
        "Form",
        json!({ "product": record, "brands": brands }),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateProduct>,
) -> Result<Response, ApiError> {
    let id = record_id(KIND, &raw_id)?;
    let payload = payload.trimmed();
    payload.validate()?;
    let outcome = state
        .with_conn(move |conn| {
            if let Some(brand_id) = payload.brand_id {
                ensure_brand(conn, brand_id)?;
            }
            Ok(lifecycle(conn).update(id, &payload))
        })
        .await?;

    Ok(outcome_response(
        outcome,
        StatusCode::OK,
        Redirects::new(KIND, format!("{}/edit", record_path(KIND, id))),
        |product| Some(product.product.id),
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

async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Value>, ApiError> {
    let suggestions = state
        .with_conn(move |conn| {
            let q = params.q.unwrap_or_default();
            Ok(ListingService::new(SqliteProductStore::new(conn)).suggest(&q, params.limit)?)
        })
        .await?;

    Ok(Json(json!({ "suggestions": suggestions })))
}
