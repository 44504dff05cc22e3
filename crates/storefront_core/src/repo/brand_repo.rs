//! SQLite record store for brands.

use super::query::{BrandSort, ListQuery};
use super::{parse_record_id, RecordStore, RepoError, RepoResult};
use crate::db::now_epoch_ms;
use crate::model::brand::{Brand, CreateBrand, UpdateBrand};
use crate::model::{RecordId, ResourceKind};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

const BRAND_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    created_at,
    updated_at
FROM brands";

/// SQLite-backed brand store.
pub struct SqliteBrandStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBrandStore<'conn> {
    /// Wraps a migrated connection (see [`crate::db::open_db`]).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Number of persisted brands.
    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM brands;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

impl RecordStore for SqliteBrandStore<'_> {
    type Record = Brand;
    type Create = CreateBrand;
    type Update = UpdateBrand;
    type Sort = BrandSort;

    const KIND: ResourceKind = ResourceKind::Brand;

    fn query(&self, query: &ListQuery<BrandSort>) -> RepoResult<Vec<Brand>> {
        let mut sql = String::from(BRAND_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(search) = query.search.as_ref() {
            sql.push_str(" WHERE instr(lower(name), lower(?)) > 0");
            bind_values.push(Value::Text(search.clone()));
        }
        sql.push_str(&query.order_clause("rowid"));
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut brands = Vec::new();
        while let Some(row) = rows.next()? {
            brands.push(parse_brand_row(row)?);
        }

        Ok(brands)
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Brand>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BRAND_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_brand_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, payload: &CreateBrand) -> RepoResult<Brand> {
        payload.validate()?;

        let now = now_epoch_ms();
        let brand = Brand {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            created_at: now,
            updated_at: now,
        };

        insert_brand_row(self.conn, &brand)?;
        Ok(brand)
    }

    fn update_by_id(&self, id: RecordId, payload: &UpdateBrand) -> RepoResult<Brand> {
        payload.validate()?;

        let changed = self.conn.execute(
            "UPDATE brands
             SET
                name = COALESCE(?2, name),
                description = COALESCE(?3, description),
                updated_at = MAX(?4, created_at)
             WHERE id = ?1;",
            params![
                id.to_string(),
                payload.name.as_deref(),
                payload.description.as_deref(),
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
            .execute("DELETE FROM brands WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Returns whether a brand with `id` exists.
pub fn brand_exists(conn: &Connection, id: RecordId) -> RepoResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM brands WHERE id = ?1;",
            [id.to_string()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Writes a fully-formed brand row, timestamps included.
pub(crate) fn insert_brand_row(conn: &Connection, brand: &Brand) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO brands (id, name, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            brand.id.to_string(),
            brand.name.as_str(),
            brand.description.as_str(),
            brand.created_at,
            brand.updated_at,
        ],
    )?;
    Ok(())
}

fn parse_brand_row(row: &Row<'_>) -> RepoResult<Brand> {
    let id_text: String = row.get("id")?;
    Ok(Brand {
        id: parse_record_id(&id_text, "brands.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
