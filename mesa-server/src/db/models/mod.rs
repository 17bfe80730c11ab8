//! Data Models
//!
//! Entities, request payloads and resolved projections for the
//! ordering domain.

pub mod account;
pub mod food;
pub mod order;
pub mod serde_helpers;

pub use account::{Customer, CustomerCreate, Shopkeeper, ShopkeeperCreate};
pub use food::{Food, FoodCreate, FoodUpdate, PublicFood};
pub use order::{
    AssignTableRequest, AssignedTableView, CancelledBy, CustomerOrderView, CustomerRef, Order,
    OrderItem, OrderItemView, OrderStatus, PlaceOrderItem, PlaceOrderRequest, ReservationType,
    RestaurantOrderView, RestaurantRef, TableOccupancy,
};
