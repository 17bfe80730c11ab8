//! Identity Models
//!
//! Customers place orders; shopkeepers own a restaurant's menu and tables.
//! Credentials live with the external identity provider, so only the
//! display fields needed by order projections are stored here.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
}

/// Shopkeeper entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shopkeeper {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub restaurant_name: String,
}

/// Create shopkeeper payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopkeeperCreate {
    pub name: String,
    pub email: String,
    pub restaurant_name: String,
}
