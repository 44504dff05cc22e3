//! Catalog use-case services.
//!
//! # Responsibility
//! - Turn inbound listing parameters into validated store queries.
//! - Run create/read/update/delete against a record store and report one
//!   user-facing outcome per mutation.
//!
//! # Invariants
//! - Services never bypass store validation or persistence contracts.
//! - Services are storage-agnostic; they only see `RecordStore`.

pub mod lifecycle;
pub mod listing;
