//! Order API Module
//!
//! Customer ordering plus restaurant-side lifecycle management.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Customer
        .route("/orders", post(handler::place_order))
        .route("/my-orders", get(handler::my_orders))
        .route("/orders/{id}/cancel", put(handler::cancel_order))
        // Shopkeeper
        .route("/restaurant/orders", get(handler::restaurant_orders))
        .route("/restaurant/orders/{id}/assign", put(handler::assign_table))
        .route("/restaurant/orders/{id}/done", put(handler::mark_done))
        .route(
            "/restaurant/orders/{id}",
            delete(handler::delete_order_request),
        )
}
