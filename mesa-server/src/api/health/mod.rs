//! Health API Module

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

/// Health router (public)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<AppResponse<Value>> {
    ok(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
