//! Table Board API Handlers

use axum::{Json, extract::State};

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::AssignedTableView;
use crate::orders::{LifecycleEngine, TableStatusEntry};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/restaurant/tables/status - live 40-table occupancy board
pub async fn table_status(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<AppResponse<Vec<TableStatusEntry>>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let board = engine.table_status(&ctx).await?;
    Ok(ok(board))
}

/// GET /api/restaurant/assigned-tables - currently seated orders
pub async fn assigned_tables(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<AssignedTableView>>> {
    let engine = LifecycleEngine::new(state.db.clone());
    let tables = engine.assigned_tables(&ctx).await?;
    Ok(Json(tables))
}
