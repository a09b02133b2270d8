//! HTTP handlers for stock entries (receipts)

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{DateField, DateRange, EntryFilter, NewStockRecord, StatusFilter, StockRecord};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_date;
use crate::services::{RecordService, ReportingService};
use crate::AppState;

#[derive(Deserialize)]
pub struct EntryQuery {
    pub status: Option<StatusFilter>,
    pub date_field: Option<DateField>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

impl EntryQuery {
    fn filter(&self) -> AppResult<EntryFilter> {
        Ok(EntryFilter {
            status: self.status.unwrap_or_default(),
            date_field: self.date_field.unwrap_or_default(),
            range: DateRange::new(
                parse_date("start", self.start.clone())?,
                parse_date("end", self.end.clone())?,
            ),
        })
    }
}

/// List held entries, optionally filtered, as JSON or CSV
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = query.filter()?;
    let service = RecordService::new(state.store.clone());
    let entries = service.list_entries(&filter).await;

    match query.format.as_deref() {
        Some("csv") => {
            let csv = ReportingService::export_entries(&entries)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"entradas.csv\""),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => Ok(Json(entries).into_response()),
        Some(other) => Err(AppError::ValidationError(format!(
            "unknown export format '{}'",
            other
        ))),
    }
}

/// Register a new receipt
pub async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<NewStockRecord>,
) -> AppResult<(StatusCode, Json<StockRecord>)> {
    let service = RecordService::new(state.store.clone());
    let record = service.create_entry(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get one record by id
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StockRecord>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.get_entry(id).await?))
}

/// Replace a record wholesale
pub async fn replace_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(record): Json<StockRecord>,
) -> AppResult<Json<StockRecord>> {
    let service = RecordService::new(state.store.clone());
    Ok(Json(service.replace_entry(id, record).await?))
}
