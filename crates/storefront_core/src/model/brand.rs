//! Brand records and payloads.

use super::{check_description, check_name, CatalogRecord, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds. Refreshed by every update.
    pub updated_at: i64,
}

impl CatalogRecord for Brand {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Payload for creating a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBrand {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateBrand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name)?;
        check_description(&self.description)
    }

    /// Trims the name, as submitted form fields are.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// Partial brand update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBrand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateBrand {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            check_name("name", name)?;
        }
        if let Some(description) = self.description.as_deref() {
            check_description(description)?;
        }
        Ok(())
    }

    /// Trims the name, as submitted form fields are.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.map(|name| name.trim().to_string());
        self
    }
}
