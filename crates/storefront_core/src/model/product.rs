//! Product records and payloads.
//!
//! A product always belongs to exactly one brand. Reads expand that
//! reference into [`ProductWithBrand`].

use super::brand::Brand;
use super::{
    check_description, check_image_url, check_name, check_price, CatalogRecord, RecordId,
    ValidationError,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub brand_id: RecordId,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product with its brand relation resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithBrand {
    #[serde(flatten)]
    pub product: Product,
    pub brand: Brand,
}

impl CatalogRecord for ProductWithBrand {
    fn record_id(&self) -> RecordId {
        self.product.id
    }

    fn display_name(&self) -> &str {
        &self.product.name
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub brand_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateProduct {
    pub fn new(brand_id: RecordId, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            brand_id,
            name: name.into(),
            description: String::new(),
            price_cents,
            image_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        check_description(&self.description)?;
        check_price(self.price_cents)?;
        if let Some(url) = self.image_url.as_deref() {
            check_image_url(url)?;
        }
        Ok(())
    }

    /// Trims the name, as submitted form fields are.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// Partial product update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(default)]
    pub brand_id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    /// `None` keeps the stored image, `Some(None)` (JSON `null`) clears it.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            check_name("name", name)?;
        }
        if let Some(description) = self.description.as_deref() {
            check_description(description)?;
        }
        if let Some(price) = self.price_cents {
            check_price(price)?;
        }
        if let Some(Some(url)) = self.image_url.as_ref() {
            check_image_url(url)?;
        }
        Ok(())
    }

    /// Whether the update removes the stored image.
    pub fn clears_image(&self) -> bool {
        matches!(self.image_url, Some(None))
    }

    /// Trims the name, as submitted form fields are.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.map(|name| name.trim().to_string());
        self
    }
}

/// Distinguishes a present `null` from an absent field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::{CreateProduct, UpdateProduct};
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn create_rejects_non_image_url() {
        let mut payload = CreateProduct::new(Uuid::new_v4(), "Kettle", 1999);
        payload.image_url = Some("https://cdn.example.com/kettle.txt".to_string());
        assert!(matches!(
            payload.validate(),
            Err(ValidationError::InvalidImageUrl(_))
        ));

        payload.image_url = Some("https://cdn.example.com/kettle.webp".to_string());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_image_url_distinguishes_null_from_absent() {
        let absent: UpdateProduct = serde_json::from_str(r#"{"name":"Kettle"}"#).unwrap();
        assert_eq!(absent.image_url, None);
        assert!(!absent.clears_image());

        let cleared: UpdateProduct = serde_json::from_str(r#"{"image_url":null}"#).unwrap();
        assert_eq!(cleared.image_url, Some(None));
        assert!(cleared.clears_image());
        assert!(cleared.validate().is_ok());

        let replaced: UpdateProduct =
            serde_json::from_str(r#"{"image_url":"https://cdn.example.com/k.txt"}"#).unwrap();
        assert!(matches!(
            replaced.validate(),
            Err(ValidationError::InvalidImageUrl(_))
        ));
    }

    #[test]
    fn trimmed_strips_name_padding() {
        let payload = CreateProduct::new(Uuid::new_v4(), "  Kettle ", 100).trimmed();
        assert_eq!(payload.name, "Kettle");
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateProduct::default().validate().is_ok());
    }

    #[test]
    fn update_rejects_negative_price() {
        let payload = UpdateProduct {
            price_cents: Some(-5),
            ..UpdateProduct::default()
        };
        assert_eq!(payload.validate(), Err(ValidationError::NegativePrice(-5)));
    }
}
