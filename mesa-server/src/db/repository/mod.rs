//! Repository Module
//!
//! CRUD and projection queries over the embedded SurrealDB store.

pub mod account;
pub mod food;
pub mod order;

pub use account::{CustomerRepository, ShopkeeperRepository};
pub use food::FoodRepository;
pub use order::OrderRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a caller-supplied reference into a RecordId of the expected table
///
/// Accepts both the full "table:key" form and the bare key.
pub fn record_ref(table: &str, raw: &str) -> RepoResult<RecordId> {
    match raw.split_once(':') {
        Some((t, key)) if t == table => {
            Ok(RecordId::from_table_key(t, key.trim_matches(['⟨', '⟩'])))
        }
        Some(_) => Err(RepoError::Validation(format!("Invalid {table} id: {raw}"))),
        None => Ok(RecordId::from_table_key(table, raw)),
    }
}

/// Base repository holding the shared database handle
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
