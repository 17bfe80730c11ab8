//! Food Model
//!
//! Menu items owned by a shopkeeper. The order lifecycle only reads foods
//! for validation and price lookup; menu management mutates them.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Food entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning shopkeeper
    #[serde(with = "serde_helpers::record_id")]
    pub shopkeeper: RecordId,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_category() -> String {
    "General".to_string()
}

/// Create food payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_special: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update food payload (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodUpdate {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
    pub is_special: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Food with the restaurant display name resolved (public menu reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicFood {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub restaurant_name: Option<String>,
}
