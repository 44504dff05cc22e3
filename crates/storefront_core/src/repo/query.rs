//! Query specs handed from the listing service to record stores.
//!
//! Sort fields are closed enums so no caller-provided text ever reaches an
//! `ORDER BY` clause.

use std::fmt::Debug;

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses `asc` / `desc`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Allow-listed sortable attribute of one resource kind.
pub trait SortField: Copy + Eq + Debug + 'static {
    /// Used when the request names no sort field.
    const DEFAULT: Self;

    /// Every accepted field, in documentation order.
    fn all() -> &'static [Self];

    /// Public parameter name (`name`, `created_at`, ...).
    fn as_str(self) -> &'static str;

    /// SQL ordering expression for this field.
    fn order_by_sql(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == value)
    }
}

/// Sortable brand attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandSort {
    Name,
    CreatedAt,
    UpdatedAt,
}

impl SortField for BrandSort {
    const DEFAULT: Self = Self::Name;

    fn all() -> &'static [Self] {
        &[Self::Name, Self::CreatedAt, Self::UpdatedAt]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn order_by_sql(self) -> &'static str {
        match self {
            Self::Name => "name COLLATE NOCASE",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sortable product attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Name,
    Price,
    /// Orders by the related brand's name.
    Brand,
    CreatedAt,
    UpdatedAt,
}

impl SortField for ProductSort {
    const DEFAULT: Self = Self::Name;

    fn all() -> &'static [Self] {
        &[
            Self::Name,
            Self::Price,
            Self::Brand,
            Self::CreatedAt,
            Self::UpdatedAt,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Brand => "brand",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn order_by_sql(self) -> &'static str {
        match self {
            Self::Name => "p.name COLLATE NOCASE",
            Self::Price => "p.price_cents",
            Self::Brand => "b.name COLLATE NOCASE",
            Self::CreatedAt => "p.created_at",
            Self::UpdatedAt => "p.updated_at",
        }
    }
}

/// Resolved listing request: validated sort plus optional search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S: SortField> {
    pub sort: S,
    pub direction: SortDirection,
    /// Trimmed, non-empty substring to match against the display name.
    pub search: Option<String>,
    /// Row cap applied after ordering; `None` returns every match.
    pub limit: Option<u32>,
}

impl<S: SortField> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            sort: S::DEFAULT,
            direction: SortDirection::Asc,
            search: None,
            limit: None,
        }
    }
}

impl<S: SortField> ListQuery<S> {
    pub(crate) fn order_clause(&self, tie_breaker: &str) -> String {
        format!(
            " ORDER BY {} {}, {tie_breaker} ASC",
            self.sort.order_by_sql(),
            self.direction.sql()
        )
    }
}
