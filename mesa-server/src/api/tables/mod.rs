//! Table Board API Module
//!
//! Derived occupancy views, shopkeeper only. The board is recomputed
//! from active orders on every request.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Table board router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurant", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/tables/status", get(handler::table_status))
        .route("/assigned-tables", get(handler::assigned_tables))
}
