//! Record stores: persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the `RecordStore` contract used by listing and lifecycle services.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths re-validate payload shape before SQL mutations.
//! - Each mutation touches exactly one record in one statement.
//! - Missing targets surface as `RepoError::NotFound`, never as silent no-ops.

pub mod brand_repo;
pub mod product_repo;
pub mod query;

use crate::db::DbError;
use crate::model::{CatalogRecord, RecordId, ResourceKind, ValidationError};
use query::{ListQuery, SortField};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for catalog persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(RecordId),
    /// Persisted row could not be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence collaborator for one resource kind.
///
/// Implementations own the storage shape; callers only see records and
/// payloads.
pub trait RecordStore {
    type Record: CatalogRecord;
    type Create;
    type Update;
    type Sort: SortField;

    const KIND: ResourceKind;

    /// Filtered, ordered listing. Never paginated.
    fn query(&self, query: &ListQuery<Self::Sort>) -> RepoResult<Vec<Self::Record>>;
    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Self::Record>>;
    /// Inserts a new record with a fresh identity and timestamps.
    fn insert(&self, payload: &Self::Create) -> RepoResult<Self::Record>;
    /// Applies a partial update and refreshes `updated_at`.
    fn update_by_id(&self, id: RecordId, payload: &Self::Update) -> RepoResult<Self::Record>;
    fn delete_by_id(&self, id: RecordId) -> RepoResult<()>;
}

pub(crate) fn parse_record_id(value: &str, column: &str) -> RepoResult<RecordId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
