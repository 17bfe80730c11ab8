//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public menu reads
        .route("/foods", get(handler::list_foods))
        .route("/foods/{id}", get(handler::get_food))
        .route("/restaurants/{id}/menu", get(handler::restaurant_menu))
        // Shopkeeper menu management
        .route(
            "/restaurant/foods",
            get(handler::my_foods).post(handler::create_food),
        )
        .route(
            "/restaurant/foods/{id}",
            put(handler::update_food).delete(handler::delete_food),
        )
}
