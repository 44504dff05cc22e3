//! Catalog domain model.
//!
//! # Responsibility
//! - Define the persisted record shapes (`Brand`, `Product`).
//! - Define create/update payloads and their shape validation.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId` assigned at insert.
//! - `created_at <= updated_at` for every persisted record.
//! - Update payloads are partial: `None` means "leave unchanged".

pub mod brand;
pub mod product;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::util::image::is_valid_image_url;

/// Opaque identity shared by every catalog record.
pub type RecordId = Uuid;

pub const NAME_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Resource kinds exposed through listing and lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Brand,
    Product,
}

impl ResourceKind {
    /// Human-facing singular label, used in outcome messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Product => "Product",
        }
    }

    /// Collection path segment, also the page component folder.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Brand => "brands",
            Self::Product => "products",
        }
    }
}

/// Common accessors over persisted records.
pub trait CatalogRecord {
    fn record_id(&self) -> RecordId;
    /// Field used for substring search and default ordering.
    fn display_name(&self) -> &str;
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload shape violations.
///
/// Raised by the boundary before a payload reaches the lifecycle manager,
/// and re-checked by stores before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankField(&'static str),
    TooLong {
        field: &'static str,
        max_chars: usize,
    },
    NegativePrice(i64),
    InvalidImageUrl(String),
    /// Product payload references a brand that does not exist.
    UnknownBrand(RecordId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max_chars } => {
                write!(f, "{field} must be at most {max_chars} characters")
            }
            Self::NegativePrice(value) => {
                write!(f, "price_cents must not be negative, got {value}")
            }
            Self::InvalidImageUrl(url) => write!(f, "image_url is not an image url: `{url}`"),
            Self::UnknownBrand(id) => write!(f, "brand_id does not reference a brand: {id}"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    check_length(field, value, NAME_MAX_CHARS)
}

pub(crate) fn check_description(value: &str) -> Result<(), ValidationError> {
    check_length("description", value, DESCRIPTION_MAX_CHARS)
}

pub(crate) fn check_price(value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativePrice(value));
    }
    Ok(())
}

pub(crate) fn check_image_url(value: &str) -> Result<(), ValidationError> {
    if !is_valid_image_url(value) {
        return Err(ValidationError::InvalidImageUrl(value.to_string()));
    }
    Ok(())
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max_chars {
        return Err(ValidationError::TooLong { field, max_chars });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_name, check_price, ResourceKind, ValidationError, NAME_MAX_CHARS};

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            check_name("name", "   "),
            Err(ValidationError::BlankField("name"))
        );
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(NAME_MAX_CHARS + 1);
        assert!(matches!(
            check_name("name", &long),
            Err(ValidationError::TooLong { field: "name", .. })
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert_eq!(check_price(-1), Err(ValidationError::NegativePrice(-1)));
        assert!(check_price(0).is_ok());
    }

    #[test]
    fn resource_kind_labels() {
        assert_eq!(ResourceKind::Brand.to_string(), "Brand");
        assert_eq!(ResourceKind::Product.collection(), "products");
    }
}
