//! Resource listing: optional sort and substring filter over one store.
//!
//! # Invariants
//! - Filtering happens before ordering; ties keep insertion order.
//! - Only allow-listed sort fields reach the store.
//! - A blank `q`, `sort`, or `direction` behaves as if it were absent.
//! - An empty result is a valid, non-error outcome.

use crate::model::CatalogRecord;
use crate::repo::query::{ListQuery, SortDirection, SortField};
use crate::repo::{RecordStore, RepoError};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SUGGESTION_DEFAULT_LIMIT: u32 = 10;
pub const SUGGESTION_LIMIT_MAX: u32 = 25;

/// Raw listing parameters as received from a request (`sort`, `direction`, `q`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl ListParams {
    pub fn sorted_by(sort: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            sort: Some(sort.into()),
            direction: Some(direction.into()),
            q: None,
        }
    }

    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    /// Validates raw parameters against the allow-list of `S`.
    pub fn resolve<S: SortField>(&self) -> Result<ListQuery<S>, ListingError> {
        let sort = match non_blank(self.sort.as_deref()) {
            Some(raw) => S::parse(raw).ok_or_else(|| ListingError::InvalidParameter {
                name: "sort",
                value: raw.to_string(),
                expected: S::all()
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join("|"),
            })?,
            None => S::DEFAULT,
        };

        let direction = match non_blank(self.direction.as_deref()) {
            Some(raw) => {
                SortDirection::parse(raw).ok_or_else(|| ListingError::InvalidParameter {
                    name: "direction",
                    value: raw.to_string(),
                    expected: "asc|desc".to_string(),
                })?
            }
            None => SortDirection::Asc,
        };

        Ok(ListQuery {
            sort,
            direction,
            search: non_blank(self.q.as_deref()).map(str::to_string),
            limit: None,
        })
    }
}

/// Filters actually applied to a listing, echoed back to views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    pub sort: &'static str,
    pub direction: &'static str,
    pub q: Option<String>,
}

impl<S: SortField> From<&ListQuery<S>> for AppliedFilters {
    fn from(query: &ListQuery<S>) -> Self {
        Self {
            sort: query.sort.as_str(),
            direction: query.direction.as_str(),
            q: query.search.clone(),
        }
    }
}

/// Listing result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<R> {
    pub items: Vec<R>,
    pub filters: AppliedFilters,
}

/// Listing errors.
#[derive(Debug)]
pub enum ListingError {
    /// Unknown sort field or direction.
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: String,
    },
    Repo(RepoError),
}

impl Display for ListingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                expected,
            } => write!(f, "invalid `{name}` value `{value}`; expected {expected}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidParameter { .. } => None,
        }
    }
}

impl From<RepoError> for ListingError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Read-only listing over one record store.
pub struct ListingService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> ListingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists records using raw request parameters.
    pub fn list(&self, params: &ListParams) -> Result<Listing<S::Record>, ListingError> {
        let query = params.resolve::<S::Sort>()?;
        let items = self.run(&query)?;
        Ok(Listing {
            items,
            filters: AppliedFilters::from(&query),
        })
    }

    /// Lists records using an already-resolved query.
    pub fn run(&self, query: &ListQuery<S::Sort>) -> Result<Vec<S::Record>, ListingError> {
        match self.store.query(query) {
            Ok(items) => {
                debug!(
                    "event=record_list module=listing status=ok kind={} sort={} direction={} filtered={} count={}",
                    S::KIND.collection(),
                    query.sort.as_str(),
                    query.direction.as_str(),
                    query.search.is_some(),
                    items.len()
                );
                Ok(items)
            }
            Err(err) => {
                error!(
                    "event=record_list module=listing status=error kind={} error={}",
                    S::KIND.collection(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Display names matching `q`, ordered by name, for type-ahead inputs.
    ///
    /// Returns an empty list for a blank `q`.
    pub fn suggest(&self, q: &str, limit: Option<u32>) -> Result<Vec<String>, ListingError> {
        let Some(search) = non_blank(Some(q)) else {
            return Ok(Vec::new());
        };
        let query = ListQuery {
            sort: <S::Sort as SortField>::DEFAULT,
            direction: SortDirection::Asc,
            search: Some(search.to_string()),
            limit: Some(normalize_suggestion_limit(limit)),
        };

        Ok(self
            .run(&query)?
            .iter()
            .map(|record| record.display_name().to_string())
            .collect())
    }
}

/// Clamps a suggestion limit: `None`/`0` use the default, large values cap.
pub fn normalize_suggestion_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => SUGGESTION_DEFAULT_LIMIT,
        Some(value) => value.min(SUGGESTION_LIMIT_MAX),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{normalize_suggestion_limit, ListParams, ListingError};
    use crate::repo::query::{BrandSort, ListQuery, ProductSort, SortDirection};

    #[test]
    fn resolve_applies_defaults() {
        let query: ListQuery<BrandSort> = ListParams::default().resolve().unwrap();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn resolve_treats_blank_values_as_absent() {
        let params = ListParams {
            sort: Some(" ".to_string()),
            direction: Some(String::new()),
            q: Some("   ".to_string()),
        };
        let query: ListQuery<ProductSort> = params.resolve().unwrap();
        assert_eq!(query.sort, ProductSort::Name);
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.search, None);
    }

    #[test]
    fn resolve_rejects_unknown_sort_field() {
        let err = ListParams::sorted_by("password", "asc")
            .resolve::<BrandSort>()
            .unwrap_err();
        match err {
            ListingError::InvalidParameter {
                name,
                value,
                expected,
            } => {
                assert_eq!(name, "sort");
                assert_eq!(value, "password");
                assert_eq!(expected, "name|created_at|updated_at");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_rejects_unknown_direction() {
        let err = ListParams::sorted_by("name", "up")
            .resolve::<BrandSort>()
            .unwrap_err();
        assert!(err.to_string().contains("direction"));
    }

    #[test]
    fn suggestion_limit_is_clamped() {
        assert_eq!(normalize_suggestion_limit(None), 10);
        assert_eq!(normalize_suggestion_limit(Some(0)), 10);
        assert_eq!(normalize_suggestion_limit(Some(3)), 3);
        assert_eq!(normalize_suggestion_limit(Some(500)), 25);
    }
}
