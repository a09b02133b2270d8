//! HTTP handlers for the yard time log

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use shared::{PerformanceSummary, PerformanceUpdate, StockRecord};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::parse_date;
use crate::services::records::{PerformanceRow, RecordService};
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct PerformanceQuery {
    /// Reference day for the loads count, today when omitted
    pub day: Option<String>,
}

#[derive(Serialize)]
pub struct PerformanceView {
    pub summary: PerformanceSummary,
    pub rows: Vec<PerformanceRow>,
}

/// Time log rows with their stay and the yard KPIs
pub async fn get_performance(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> AppResult<Json<PerformanceView>> {
    let day = parse_date("day", query.day)?.unwrap_or_else(|| Local::now().date_naive());

    let summary = ReportingService::new(state.store.clone())
        .get_performance_summary(day)
        .await;
    let rows = RecordService::new(state.store.clone())
        .performance_rows()
        .await;

    Ok(Json(PerformanceView { summary, rows }))
}

/// Replace the arrival, dock-in and dock-out times of a record
pub async fn log_times(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(times): Json<PerformanceUpdate>,
) -> AppResult<Json<StockRecord>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.log_times(id, &times).await?))
}
