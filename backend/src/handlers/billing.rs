//! HTTP handlers for billing reconciliation

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{BillingUpdate, StockRecord};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::RecordService;
use crate::AppState;

/// Every record with its billing documents
pub async fn list_billing(State(state): State<AppState>) -> AppResult<Json<Vec<StockRecord>>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.billing_records().await))
}

/// Replace the billing documents of a record
pub async fn update_billing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(billing): Json<BillingUpdate>,
) -> AppResult<Json<StockRecord>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.update_billing(id, &billing).await?))
}
