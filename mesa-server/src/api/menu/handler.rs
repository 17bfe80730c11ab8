//! Menu API Handlers
//!
//! Public menu reads plus shopkeeper menu management. Image uploads are
//! handled elsewhere; `image_url` travels as plain metadata.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::{Food, FoodCreate, FoodUpdate, PublicFood};
use crate::db::repository::{FoodRepository, record_ref};
use crate::orders::LifecycleEngine;
use crate::utils::{AppError, AppResponse, AppResult, ok_message};

/// GET /api/foods - all available foods (public)
pub async fn list_foods(State(state): State<ServerState>) -> AppResult<Json<Vec<PublicFood>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let foods = engine.public_foods().await?;
    Ok(Json(foods))
}

/// GET /api/foods/{id} - single food detail (public)
pub async fn get_food(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicFood>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let food = engine
        .public_food(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food {id} not found")))?;
    Ok(Json(food))
}

/// GET /api/restaurants/{id}/menu - available menu of one restaurant (public)
pub async fn restaurant_menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Food>>> {
    let restaurant = record_ref("shopkeeper", &id)?;
    let repo = FoodRepository::new(state.db.clone());
    let foods = repo.menu_of(&restaurant).await?;
    Ok(Json(foods))
}

/// GET /api/restaurant/foods - own menu, newest first (shopkeeper)
pub async fn my_foods(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<Food>>> {
    let shopkeeper = ctx.shopkeeper_id()?;
    let repo = FoodRepository::new(state.db.clone());
    let foods = repo.find_by_shopkeeper(&shopkeeper).await?;
    Ok(Json(foods))
}

/// POST /api/restaurant/foods - add a menu item (shopkeeper)
pub async fn create_food(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Json(payload): Json<FoodCreate>,
) -> AppResult<(StatusCode, Json<Food>)> {
    payload.validate()?;
    let shopkeeper = ctx.shopkeeper_id()?;
    let repo = FoodRepository::new(state.db.clone());
    let food = repo.create(shopkeeper, payload).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

/// PUT /api/restaurant/foods/{id} - update a menu item (shopkeeper)
pub async fn update_food(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(payload): Json<FoodUpdate>,
) -> AppResult<Json<Food>> {
    payload.validate()?;
    let shopkeeper = ctx.shopkeeper_id()?;
    let repo = FoodRepository::new(state.db.clone());
    let food = repo.update(&id, &shopkeeper, payload).await?;
    Ok(Json(food))
}

/// DELETE /api/restaurant/foods/{id} - remove a menu item (shopkeeper)
pub async fn delete_food(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let shopkeeper = ctx.shopkeeper_id()?;
    let repo = FoodRepository::new(state.db.clone());
    let deleted = repo.delete(&id, &shopkeeper).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Food {id} not found")));
    }
    Ok(ok_message("Food deleted successfully"))
}
