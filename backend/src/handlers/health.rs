//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::RecordService;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
    pub storage: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = RecordService::new(state.store.clone()).count().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
        storage: state.config.storage.path.display().to_string(),
    })
}
