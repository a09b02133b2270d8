//! Dashboard handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{aggregation::GroupField, DashboardSummary, GroupSummary};

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub top: Option<usize>,
    pub destination_top: Option<usize>,
}

#[derive(Deserialize)]
pub struct GroupQuery {
    pub top: Option<usize>,
}

/// Get dashboard summary
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardSummary>> {
    let mut options = state.config.dashboard.options();
    if let Some(top) = query.top {
        options.top_n = top;
    }
    if let Some(top) = query.destination_top {
        options.destination_top_n = top;
    }

    let service = ReportingService::new(state.store.clone());
    Ok(Json(service.get_dashboard(&options).await))
}

/// Get held records grouped by one field
pub async fn get_dashboard_groups(
    State(state): State<AppState>,
    Path(field): Path<GroupField>,
    Query(query): Query<GroupQuery>,
) -> AppResult<Json<Vec<GroupSummary>>> {
    let limit = query.top.unwrap_or(state.config.dashboard.top_n);
    let service = ReportingService::new(state.store.clone());
    Ok(Json(service.get_groups(field, limit).await))
}
