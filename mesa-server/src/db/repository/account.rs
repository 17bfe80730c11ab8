//! Customer and Shopkeeper Repositories
//!
//! Read-mostly. Order projections resolve display names through these.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Customer, CustomerCreate, Shopkeeper, ShopkeeperCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const CUSTOMER: &str = "customer";
const SHOPKEEPER: &str = "shopkeeper";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = self.base.db().select(id.clone()).await?;
        Ok(customer)
    }

    /// Batch fetch for projection joins
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = Customer {
            id: None,
            name: data.name,
            email: data.email,
        };
        let created: Option<Customer> = self.base.db().create(CUSTOMER).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }
}

#[derive(Clone)]
pub struct ShopkeeperRepository {
    base: BaseRepository,
}

impl ShopkeeperRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Shopkeeper>> {
        let shopkeeper: Option<Shopkeeper> = self.base.db().select(id.clone()).await?;
        Ok(shopkeeper)
    }

    /// Batch fetch for projection joins
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Shopkeeper>> {
        let shopkeepers: Vec<Shopkeeper> = self
            .base
            .db()
            .query("SELECT * FROM shopkeeper WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(shopkeepers)
    }

    pub async fn create(&self, data: ShopkeeperCreate) -> RepoResult<Shopkeeper> {
        let shopkeeper = Shopkeeper {
            id: None,
            name: data.name,
            email: data.email,
            restaurant_name: data.restaurant_name,
        };
        let created: Option<Shopkeeper> =
            self.base.db().create(SHOPKEEPER).content(shopkeeper).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create shopkeeper".to_string()))
    }
}
