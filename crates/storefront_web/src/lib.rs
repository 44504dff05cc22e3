//! HTTP surface for the storefront catalog.
//!
//! # Responsibility
//! - Map resource routes (list, create form, store, show, edit form, update,
//!   delete) for brands and products onto core services.
//! - Validate inbound payloads before they reach the lifecycle manager.
//! - Render server-driven page payloads and mutation envelopes.
//!
//! # Invariants
//! - Each request opens its own database connection; no state is shared
//!   between requests beyond the database path.
//! - Store failure details are logged, never returned to clients.

pub mod config;
pub mod error;
pub mod extract;
pub mod page;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

use axum::Router;

/// Builds the complete application router.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}
