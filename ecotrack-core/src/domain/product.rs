//! Product and favorite models
//!
//! Products are owned by the API; the client only displays them and forwards
//! their barcode.

use serde::{Deserialize, Serialize};

use super::ids::{deserialize_id, deserialize_optional_id};

/// A product as returned by the product search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-side row id (present on responses from the original API)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_id")]
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub nutriscore: Option<String>,
    #[serde(default)]
    pub ecoscore: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A product saved to a user's favorites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub nutriscore: Option<String>,
    #[serde(default)]
    pub ecoscore: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl FavoriteEntry {
    /// The product part of this favorite
    pub fn product(&self) -> Product {
        Product {
            id: Some(self.id.clone()),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            nutriscore: self.nutriscore.clone(),
            ecoscore: self.ecoscore.clone(),
            category: self.category.clone(),
        }
    }
}

/// Placeholder shown for missing scores and categories
pub const NOT_AVAILABLE: &str = "N/A";

/// Display helper for optional product attributes
pub fn or_not_available(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
}
