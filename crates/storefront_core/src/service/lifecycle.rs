//! Resource lifecycle: create, read, update, delete over one store.
//!
//! # Invariants
//! - Every mutation yields exactly one user-facing message.
//! - Store failures on mutations collapse to [`PERSISTENCE_FAILURE_MESSAGE`];
//!   the real cause is logged, never returned.
//! - `NotFound` stays distinct from persistence failures on every path.
//! - Delete of an absent record is `NotFound`, not a silent success.

use crate::model::{CatalogRecord, RecordId, ResourceKind};
use crate::repo::{RecordStore, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Failed to store data. Please try again.";
pub const UPDATED_MESSAGE: &str = "Data updated successfully.";
pub const DELETED_MESSAGE: &str = "Data deleted successfully.";

/// Result of one mutating lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success { message: String, value: T },
    NotFound { message: String, id: RecordId },
    /// Generic persistence failure. `message` is always
    /// [`PERSISTENCE_FAILURE_MESSAGE`].
    Failure { message: String },
}

impl<T> Outcome<T> {
    /// User-facing message, present for every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::NotFound { message, .. }
            | Self::Failure { message } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    fn success(message: impl Into<String>, value: T) -> Self {
        Self::Success {
            message: message.into(),
            value,
        }
    }

    fn not_found(kind: ResourceKind, id: RecordId) -> Self {
        Self::NotFound {
            message: not_found_message(kind),
            id,
        }
    }

    fn failure() -> Self {
        Self::Failure {
            message: PERSISTENCE_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Error for non-mutating reads.
#[derive(Debug)]
pub enum LifecycleError {
    NotFound { kind: ResourceKind, id: RecordId },
    Persistence(RepoError),
}

impl LifecycleError {
    /// Message safe to show an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { kind, .. } => not_found_message(*kind),
            Self::Persistence(_) => PERSISTENCE_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.collection()),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

/// Create/read/update/delete manager for one resource kind.
pub struct LifecycleManager<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> LifecycleManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a record from a pre-validated payload.
    pub fn create(&self, payload: &S::Create) -> Outcome<S::Record> {
        match self.store.insert(payload) {
            Ok(record) => {
                info!(
                    "event=record_create module=lifecycle status=ok kind={} id={}",
                    S::KIND.collection(),
                    record.record_id()
                );
                Outcome::success(format!("{} created successfully.", S::KIND.label()), record)
            }
            Err(err) => {
                log_failure("record_create", S::KIND, None, &err);
                Outcome::failure()
            }
        }
    }

    /// Reads one record; products come back with their brand expanded.
    pub fn read(&self, id: RecordId) -> Result<S::Record, LifecycleError> {
        match self.store.find_by_id(id) {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(LifecycleError::NotFound { kind: S::KIND, id }),
            Err(err) => {
                log_failure("record_read", S::KIND, Some(id), &err);
                Err(LifecycleError::Persistence(err))
            }
        }
    }

    /// Overwrites the fields present in `payload`.
    pub fn update(&self, id: RecordId, payload: &S::Update) -> Outcome<S::Record> {
        match self.store.update_by_id(id, payload) {
            Ok(record) => {
                info!(
                    "event=record_update module=lifecycle status=ok kind={} id={}",
                    S::KIND.collection(),
                    id
                );
                Outcome::success(UPDATED_MESSAGE, record)
            }
            Err(RepoError::NotFound(missing)) => {
                warn!(
                    "event=record_update module=lifecycle status=not_found kind={} id={}",
                    S::KIND.collection(),
                    missing
                );
                Outcome::not_found(S::KIND, missing)
            }
            Err(err) => {
                log_failure("record_update", S::KIND, Some(id), &err);
                Outcome::failure()
            }
        }
    }

    /// Removes a record.
    pub fn delete(&self, id: RecordId) -> Outcome<()> {
        match self.store.delete_by_id(id) {
            Ok(()) => {
                info!(
                    "event=record_delete module=lifecycle status=ok kind={} id={}",
                    S::KIND.collection(),
                    id
                );
                Outcome::success(DELETED_MESSAGE, ())
            }
            Err(RepoError::NotFound(missing)) => {
                warn!(
                    "event=record_delete module=lifecycle status=not_found kind={} id={}",
                    S::KIND.collection(),
                    missing
                );
                Outcome::not_found(S::KIND, missing)
            }
            Err(err) => {
                log_failure("record_delete", S::KIND, Some(id), &err);
                Outcome::failure()
            }
        }
    }

    /// Borrow the underlying store, e.g. to build a listing over it.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn not_found_message(kind: ResourceKind) -> String {
    format!("{} not found.", kind.label())
}

fn log_failure(event: &str, kind: ResourceKind, id: Option<RecordId>, err: &RepoError) {
    let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    error!(
        "event={} module=lifecycle status=error kind={} id={} error={}",
        event,
        kind.collection(),
        id,
        err
    );
}

#[cfg(test)]
mod tests {
    use super::{Outcome, PERSISTENCE_FAILURE_MESSAGE};
    use crate::model::ResourceKind;
    use uuid::Uuid;

    #[test]
    fn every_variant_carries_a_message() {
        let success: Outcome<u8> = Outcome::success("ok", 1);
        let missing: Outcome<u8> = Outcome::not_found(ResourceKind::Product, Uuid::nil());
        let failed: Outcome<u8> = Outcome::failure();

        assert_eq!(success.message(), "ok");
        assert_eq!(missing.message(), "Product not found.");
        assert_eq!(failed.message(), PERSISTENCE_FAILURE_MESSAGE);
        assert_eq!(success.into_value(), Some(1));
        assert_eq!(failed.value(), None);
    }
}
