//! Core catalog logic for the storefront: brands, products, and the
//! listing/lifecycle services that operate on them.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod util;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingOptions,
};
pub use model::brand::{Brand, CreateBrand, UpdateBrand};
pub use model::product::{CreateProduct, Product, ProductWithBrand, UpdateProduct};
pub use model::{CatalogRecord, RecordId, ResourceKind, ValidationError};
pub use repo::brand_repo::{brand_exists, SqliteBrandStore};
pub use repo::product_repo::SqliteProductStore;
pub use repo::query::{BrandSort, ListQuery, ProductSort, SortDirection, SortField};
pub use repo::{RecordStore, RepoError, RepoResult};
pub use seed::{seed_catalog, SeedError, SeedPlan, SeedReport};
pub use service::lifecycle::{
    LifecycleError, LifecycleManager, Outcome, DELETED_MESSAGE, PERSISTENCE_FAILURE_MESSAGE,
    UPDATED_MESSAGE,
};
pub use service::listing::{AppliedFilters, ListParams, Listing, ListingError, ListingService};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
