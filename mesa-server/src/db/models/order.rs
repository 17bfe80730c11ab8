//! Order Model
//!
//! The central entity of the ordering backend. An order is created by a
//! customer against one restaurant, carries an immutable item list and
//! creation-time total, and then moves through the table lifecycle
//! (request, assignment, completion) or gets cancelled.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

// =============================================================================
// Order
// =============================================================================

/// Order status enum
///
/// `Accepted`, `Preparing` and `Delivered` are valid stored states but the
/// lifecycle engine defines no transition into them. They exist for kitchen
/// workflow tooling that updates orders out of band; the engine treats them
/// like any other non-assigned status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Delivered,
    Cancelled,
    TableRequested,
    TableAssigned,
    Done,
}

impl OrderStatus {
    /// Whether the order currently holds a table
    pub fn is_table_assigned(&self) -> bool {
        matches!(self, OrderStatus::TableAssigned)
    }
}

/// Reservation type, fixed at creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationType {
    #[default]
    Takeaway,
    DineIn,
}

impl ReservationType {
    /// Initial order status implied by the reservation type
    pub fn initial_status(&self) -> OrderStatus {
        match self {
            ReservationType::DineIn => OrderStatus::TableRequested,
            ReservationType::Takeaway => OrderStatus::Pending,
        }
    }
}

/// Who cancelled the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelledBy {
    User,
    Admin,
}

/// Order line item. Quantity is at least 1, set at creation, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub food: RecordId,
    pub quantity: i32,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Placing customer, immutable after creation
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// Owning shopkeeper, immutable after creation
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub items: Vec<OrderItem>,
    /// Creation-time sum of unit price times quantity, never recomputed
    pub total_price: f64,
    pub status: OrderStatus,
    pub reservation_type: ReservationType,
    /// Occupied table in [1,40], set only by table assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    /// Epoch milliseconds of the assignment, mirrors `table_number`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_assigned_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<CancelledBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    /// Epoch milliseconds, maintained by the store layer
    pub created_at: i64,
    pub updated_at: i64,
}

// =============================================================================
// API Request Types
// =============================================================================

/// Line item of a place-order request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderItem {
    pub food_id: String,
    /// Defaults to 1 when omitted
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

/// Place order payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    pub restaurant_id: String,
    #[validate(length(min = 1, message = "No food items provided"))]
    #[validate(nested)]
    pub items: Vec<PlaceOrderItem>,
    #[serde(default)]
    pub reservation_type: Option<ReservationType>,
    pub special_instructions: Option<String>,
    pub delivery_address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
}

/// Assign table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignTableRequest {
    #[validate(range(min = 1, max = 40, message = "Table number must be between 1 and 40"))]
    pub table_number: i32,
}

// =============================================================================
// API Response Types (resolved projections)
// =============================================================================

/// Restaurant reference resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: String,
    pub restaurant_name: String,
}

/// Customer reference resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Line item with food details resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub food_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: i32,
}

/// Order as seen by the placing customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrderView {
    pub id: String,
    pub restaurant: RestaurantRef,
    pub items: Vec<OrderItemView>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub reservation_type: ReservationType,
    pub table_number: Option<i32>,
    pub table_assigned_at: Option<i64>,
    pub special_instructions: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order as seen by the owning restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantOrderView {
    pub id: String,
    pub customer: CustomerRef,
    pub items: Vec<OrderItemView>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub reservation_type: ReservationType,
    pub table_number: Option<i32>,
    pub table_assigned_at: Option<i64>,
    pub special_instructions: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Occupancy row backing the table board projection
///
/// One row per order currently holding a table, with the customer
/// display fields resolved through the record link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOccupancy {
    pub table_number: Option<i32>,
    pub table_assigned_at: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}

/// Row of the assigned-tables listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedTableView {
    pub order_id: String,
    pub table_number: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub total_price: f64,
    pub status: OrderStatus,
    pub assigned_at: Option<i64>,
    pub special_instructions: Option<String>,
    pub items: Vec<OrderItemView>,
}
