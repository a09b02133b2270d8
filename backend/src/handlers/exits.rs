//! HTTP handlers for yard exits

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{ExitUpdate, StockRecord};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::records::{ExitBoard, RecordService};
use crate::AppState;

/// Held records awaiting exit plus the departure history
pub async fn list_exits(State(state): State<AppState>) -> AppResult<Json<ExitBoard>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.exit_board().await))
}

/// Register an exit for a record
pub async fn record_exit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(exit): Json<ExitUpdate>,
) -> AppResult<Json<StockRecord>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.record_exit(id, &exit).await?))
}
