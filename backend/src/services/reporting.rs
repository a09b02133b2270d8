//! Reporting service for the dashboard, yard KPIs and data export

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    aggregation::{self, DashboardOptions, GroupField},
    performance::summarize_performance,
    DashboardSummary, GroupSummary, PerformanceSummary, StockRecord,
};

use crate::error::{AppError, AppResult};
use crate::storage::SharedStore;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: SharedStore,
}

/// Flat CSV line for the entry export
#[derive(Debug, Serialize)]
pub struct EntryExportRow {
    pub month: String,
    pub invoice_number: String,
    pub access_key: String,
    pub product: String,
    pub supplier: String,
    pub weight_tons: String,
    pub value: String,
    pub invoice_date: Option<NaiveDate>,
    pub unloading_date: Option<NaiveDate>,
    pub status: String,
    pub vehicle_plate: String,
    pub container: String,
    pub destination: String,
}

impl From<&StockRecord> for EntryExportRow {
    fn from(record: &StockRecord) -> Self {
        Self {
            month: record.month.clone(),
            invoice_number: record.invoice_number.clone(),
            access_key: record.access_key.clone(),
            product: record.product_description.clone(),
            supplier: record.supplier.clone(),
            weight_tons: record.weight_tons.to_string(),
            value: record.value.to_string(),
            invoice_date: record.invoice_date,
            unloading_date: record.unloading_date,
            status: record.status.wire_name().to_string(),
            vehicle_plate: record.vehicle_plate.clone(),
            container: record.container.clone(),
            destination: record.destination.clone(),
        }
    }
}

impl ReportingService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Get dashboard summary
    pub async fn get_dashboard(&self, options: &DashboardOptions) -> DashboardSummary {
        let store = self.store.read().await;
        aggregation::summarize(store.snapshot(), options)
    }

    /// Held records grouped by one field, largest groups first
    pub async fn get_groups(&self, field: GroupField, limit: usize) -> Vec<GroupSummary> {
        let store = self.store.read().await;
        aggregation::top_groups(store.snapshot(), field.accessor(), limit)
    }

    pub async fn get_performance_summary(&self, day: NaiveDate) -> PerformanceSummary {
        let store = self.store.read().await;
        summarize_performance(store.snapshot(), day)
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    pub fn export_entries(records: &[StockRecord]) -> AppResult<String> {
        let rows: Vec<EntryExportRow> = records.iter().map(EntryExportRow::from).collect();
        Self::export_to_csv(&rows)
    }
}
