//! Database Module
//!
//! Embedded SurrealDB bootstrap plus models and repositories.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "mesa";
const DATABASE: &str = "mesa";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path and apply schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready at {db_path} (SurrealDB embedded, RocksDB)");

        Ok(Self { db })
    }
}

/// Apply table and index definitions
///
/// Tables stay schemaless; indexes back the hot lookups of the order
/// lifecycle (orders by customer/restaurant, foods by shopkeeper).
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS customer SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS shopkeeper SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS food SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;

        DEFINE INDEX IF NOT EXISTS order_customer ON order FIELDS customer;
        DEFINE INDEX IF NOT EXISTS order_restaurant ON order FIELDS restaurant;
        DEFINE INDEX IF NOT EXISTS order_restaurant_status ON order FIELDS restaurant, status;
        DEFINE INDEX IF NOT EXISTS food_shopkeeper ON food FIELDS shopkeeper;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
