//! Order Repository
//!
//! Persistence for the order ledger. Creation runs inside a transaction
//! block so a failure between validation and insert leaves no partial
//! order; every other mutation is a single-document update.

use super::{BaseRepository, RepoError, RepoResult, record_ref};
use crate::db::models::{CancelledBy, Order, OrderStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a fully validated order as a single atomic unit
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("BEGIN TRANSACTION; CREATE order CONTENT $order; COMMIT TRANSACTION;")
            .bind(("order", order))
            .await?;
        let created: Vec<Order> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = record_ref(TABLE, id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All orders of one customer, newest first
    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE customer = $customer ORDER BY created_at DESC")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders of one restaurant, newest first
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE restaurant = $restaurant ORDER BY created_at DESC")
            .bind(("restaurant", restaurant.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders of one restaurant holding a table, latest assignment first
    pub async fn find_assigned(&self, restaurant: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE restaurant = $restaurant AND status = $status \
                 ORDER BY table_assigned_at DESC",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("status", OrderStatus::TableAssigned))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find another active order of the same restaurant holding the table
    ///
    /// Used by the conditional assignment guard. The order being assigned
    /// is excluded so re-assigning it to a new table stays legal.
    pub async fn table_occupant(
        &self,
        restaurant: &RecordId,
        table_number: i32,
        exclude: &RecordId,
    ) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE restaurant = $restaurant \
                 AND table_number = $table_number AND status = $status \
                 AND id != $exclude LIMIT 1",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("table_number", table_number))
            .bind(("status", OrderStatus::TableAssigned))
            .bind(("exclude", exclude.clone()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Seat the order: set table fields and move to TableAssigned
    pub async fn assign_table(
        &self,
        id: &RecordId,
        table_number: i32,
        now: i64,
    ) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET table_number = $table_number, table_assigned_at = $now, \
                 status = $status, updated_at = $now RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("table_number", table_number))
            .bind(("now", now))
            .bind(("status", OrderStatus::TableAssigned))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Complete the order and free its table
    pub async fn mark_done(&self, id: &RecordId, now: i64) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET status = $status, table_number = NONE, \
                 table_assigned_at = NONE, updated_at = $now RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("status", OrderStatus::Done))
            .bind(("now", now))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Cancel the order, recording who cancelled and why
    pub async fn cancel(
        &self,
        id: &RecordId,
        cancelled_by: CancelledBy,
        reason: &str,
        now: i64,
    ) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET status = $status, cancelled_by = $cancelled_by, \
                 cancel_reason = $reason, updated_at = $now RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("status", OrderStatus::Cancelled))
            .bind(("cancelled_by", cancelled_by))
            .bind(("reason", reason.to_string()))
            .bind(("now", now))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Hard delete. The only removal path, reserved for still-pending
    /// table requests.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", id.clone()))
            .await?;
        Ok(())
    }
}
