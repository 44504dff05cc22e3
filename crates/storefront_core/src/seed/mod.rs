//! Demo/test data seeding.
//!
//! # Invariants
//! - Seeding replaces the whole catalog: both tables are cleared first.
//! - The clear and all inserts run in one transaction.
//! - Every seeded product references a brand seeded in the same run.

pub mod factory;

use crate::repo::brand_repo::insert_brand_row;
use crate::repo::product_repo::insert_product_row;
use crate::repo::RepoError;
use factory::CatalogFactory;
use log::info;
use rand::Rng;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SEED_BRANDS: u32 = 15;
pub const DEFAULT_SEED_PRODUCTS: u32 = 30;

/// How many records to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub brands: u32,
    pub products: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            brands: DEFAULT_SEED_BRANDS,
            products: DEFAULT_SEED_PRODUCTS,
        }
    }
}

/// Counts actually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub brands: u32,
    pub products: u32,
}

#[derive(Debug)]
pub enum SeedError {
    /// Products were requested without any brand to own them.
    ProductsWithoutBrands { products: u32 },
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductsWithoutBrands { products } => write!(
                f,
                "cannot seed {products} product(s) without at least one brand"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ProductsWithoutBrands { .. } => None,
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Replaces the catalog with freshly generated random records.
pub fn seed_catalog(conn: &mut Connection, plan: &SeedPlan) -> Result<SeedReport, SeedError> {
    seed_catalog_with(conn, plan, &mut CatalogFactory::new())
}

/// Same as [`seed_catalog`] with a caller-provided factory.
pub fn seed_catalog_with<R: Rng>(
    conn: &mut Connection,
    plan: &SeedPlan,
    factory: &mut CatalogFactory<R>,
) -> Result<SeedReport, SeedError> {
    if plan.brands == 0 && plan.products > 0 {
        return Err(SeedError::ProductsWithoutBrands {
            products: plan.products,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch("DELETE FROM products; DELETE FROM brands;")?;

    let mut brand_ids = Vec::with_capacity(plan.brands as usize);
    for _ in 0..plan.brands {
        let brand = factory.brand();
        insert_brand_row(&tx, &brand)?;
        brand_ids.push(brand.id);
    }

    for _ in 0..plan.products {
        let Some(brand_id) = factory.pick(&brand_ids).copied() else {
            break;
        };
        let product = factory.product(brand_id);
        insert_product_row(&tx, &product)?;
    }
    tx.commit()?;

    info!(
        "event=catalog_seed module=seed status=ok brands={} products={}",
        plan.brands, plan.products
    );
    Ok(SeedReport {
        brands: plan.brands,
        products: plan.products,
    })
}
