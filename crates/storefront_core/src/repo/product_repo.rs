//! SQLite record store for products.
//!
//! # Invariants
//! - Every read joins the owning brand; a product row is never returned
//!   without it.
//! - `brand_id` is enforced by a foreign key, so writes naming a missing
//!   brand fail at the store.

use super::query::{ListQuery, ProductSort};
use super::{parse_record_id, RecordStore, RepoError, RepoResult};
use crate::db::now_epoch_ms;
use crate::model::brand::Brand;
use crate::model::product::{CreateProduct, Product, ProductWithBrand, UpdateProduct};
use crate::model::{RecordId, ResourceKind};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const PRODUCT_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.brand_id AS brand_id,
    p.name AS name,
    p.description AS description,
    p.price_cents AS price_cents,
    p.image_url AS image_url,
    p.created_at AS created_at,
    p.updated_at AS updated_at,
    b.name AS brand_name,
    b.description AS brand_description,
    b.created_at AS brand_created_at,
    b.updated_at AS brand_updated_at
FROM products p
INNER JOIN brands b ON b.id = p.brand_id";

/// SQLite-backed product store with brand expansion.
pub struct SqliteProductStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Number of persisted products.
    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

impl RecordStore for SqliteProductStore<'_> {
    type Record = ProductWithBrand;
    type Create = CreateProduct;
    type Update = UpdateProduct;
    type Sort = ProductSort;

    const KIND: ResourceKind = ResourceKind::Product;

    fn query(&self, query: &ListQuery<ProductSort>) -> RepoResult<Vec<ProductWithBrand>> {
        let mut sql = String::from(PRODUCT_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(search) = query.search.as_ref() {
            sql.push_str(" WHERE instr(lower(p.name), lower(?)) > 0");
            bind_values.push(Value::Text(search.clone()));
        }
        sql.push_str(&query.order_clause("p.rowid"));
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ProductWithBrand>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_product_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, payload: &CreateProduct) -> RepoResult<ProductWithBrand> {
        payload.validate()?;

        let now = now_epoch_ms();
        let product = Product {
            id: Uuid::new_v4(),
            brand_id: payload.brand_id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price_cents: payload.price_cents,
            image_url: payload.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        insert_product_row(self.conn, &product)?;

        self.find_by_id(product.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("product {} missing after insert", product.id))
        })
    }

    fn update_by_id(&self, id: RecordId, payload: &UpdateProduct) -> RepoResult<ProductWithBrand> {
        payload.validate()?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                brand_id = COALESCE(?2, brand_id),
                name = COALESCE(?3, name),
                description = COALESCE(?4, description),
                price_cents = COALESCE(?5, price_cents),
                image_url = CASE WHEN ?7 THEN NULL ELSE COALESCE(?6, image_url) END,
                updated_at = MAX(?8, created_at)
             WHERE id = ?1;",
            params![
                id.to_string(),
                payload.brand_id.map(|brand_id| brand_id.to_string()),
                payload.name.as_deref(),
                payload.description.as_deref(),
                payload.price_cents,
                payload.image_url.clone().flatten(),
                payload.clears_image(),
                now_epoch_ms(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.find_by_id(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_by_id(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Writes a fully-formed product row, timestamps included.
pub(crate) fn insert_product_row(conn: &Connection, product: &Product) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO products (
            id,
            brand_id,
            name,
            description,
            price_cents,
            image_url,
            created_at,
            updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            product.id.to_string(),
            product.brand_id.to_string(),
            product.name.as_str(),
            product.description.as_str(),
            product.price_cents,
            product.image_url.as_deref(),
            product.created_at,
            product.updated_at,
        ],
    )?;
    Ok(())
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<ProductWithBrand> {
    let id_text: String = row.get("id")?;
    let brand_id_text: String = row.get("brand_id")?;
    let brand_id = parse_record_id(&brand_id_text, "products.brand_id")?;

    let product = Product {
        id: parse_record_id(&id_text, "products.id")?,
        brand_id,
        name: row.get("name")?,
        description: row.get("description")?,
        price_cents: row.get("price_cents")?,
        image_url: row.get("image_url")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    let brand = Brand {
        id: brand_id,
        name: row.get("brand_name")?,
        description: row.get("brand_description")?,
        created_at: row.get("brand_created_at")?,
        updated_at: row.get("brand_updated_at")?,
    };

    Ok(ProductWithBrand { product, brand })
}
