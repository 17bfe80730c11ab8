//! Caller identity
//!
//! [`AuthContext`] is the explicit identity value handed to every
//! lifecycle operation. It is built from validated JWT claims and never
//! read from ambient request state inside the engine.

use surrealdb::RecordId;

use crate::auth::{AuthRole, Claims};
use crate::db::repository::record_ref;
use crate::utils::{AppError, AppResult};

/// Authenticated caller (customer or shopkeeper)
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Identity record id string, e.g. "customer:abc"
    pub id: String,
    /// Display name
    pub name: String,
    /// Caller role
    pub role: AuthRole,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

impl AuthContext {
    /// Resolve the caller as a customer record, rejecting shopkeepers
    pub fn customer_id(&self) -> AppResult<RecordId> {
        if self.role != AuthRole::Customer {
            return Err(AppError::forbidden("Customer account required"));
        }
        record_ref("customer", &self.id).map_err(AppError::from)
    }

    /// Resolve the caller as a shopkeeper record, rejecting customers
    pub fn shopkeeper_id(&self) -> AppResult<RecordId> {
        if self.role != AuthRole::Shopkeeper {
            return Err(AppError::forbidden("Shopkeeper account required"));
        }
        record_ref("shopkeeper", &self.id).map_err(AppError::from)
    }
}
