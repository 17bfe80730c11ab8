//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::{
    AssignTableRequest, CustomerOrderView, Order, PlaceOrderRequest, ReservationType,
    RestaurantOrderView,
};
use crate::orders::LifecycleEngine;
use crate::utils::{AppResponse, AppResult, ok_message, ok_with_message};

/// POST /api/orders - place an order or request a table (customer)
pub async fn place_order(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Order>>)> {
    payload.validate()?;

    let message = match payload.reservation_type.unwrap_or_default() {
        ReservationType::DineIn => "Table request sent successfully",
        ReservationType::Takeaway => "Order placed successfully",
    };

    let engine = LifecycleEngine::new(state.db.clone());
    let order = engine.place_order(&ctx, payload).await?;

    Ok((StatusCode::CREATED, ok_with_message(order, message)))
}

/// GET /api/my-orders - the caller's own orders, newest first (customer)
pub async fn my_orders(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<CustomerOrderView>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let orders = engine.my_orders(&ctx).await?;
    Ok(Json(orders))
}

/// GET /api/restaurant/orders - all orders of the restaurant (shopkeeper)
pub async fn restaurant_orders(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<RestaurantOrderView>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let orders = engine.restaurant_orders(&ctx).await?;
    Ok(Json(orders))
}

/// PUT /api/restaurant/orders/{id}/assign - seat an order (shopkeeper)
pub async fn assign_table(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(payload): Json<AssignTableRequest>,
) -> AppResult<Json<AppResponse<RestaurantOrderView>>> {
    payload.validate()?;

    let engine = LifecycleEngine::new(state.db.clone());
    let order = engine
        .assign_table(&ctx, &id, payload.table_number)
        .await?;

    Ok(ok_with_message(
        order,
        format!("Table {} assigned successfully", payload.table_number),
    ))
}

/// PUT /api/restaurant/orders/{id}/done - complete and free the table (shopkeeper)
pub async fn mark_done(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<RestaurantOrderView>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let order = engine.mark_done(&ctx, &id).await?;
    Ok(ok_with_message(
        order,
        "Order marked as done. Table is now free.",
    ))
}

/// PUT /api/orders/{id}/cancel - customer self-cancellation
pub async fn cancel_order(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let order = engine.cancel_order(&ctx, &id).await?;
    Ok(ok_with_message(order, "Order cancelled successfully"))
}

/// DELETE /api/restaurant/orders/{id} - remove a pending request (shopkeeper)
pub async fn delete_order_request(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    engine.delete_order_request(&ctx, &id).await?;
    Ok(ok_message("Order request deleted successfully"))
}
