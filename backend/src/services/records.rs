//! Stock record service for the entry, exit, performance and billing views

use serde::Serialize;
use shared::{
    duration::Elapsed,
    filter::filter_held,
    performance::dwell,
    BillingUpdate, EntryFilter, ExitUpdate, NewStockRecord, PerformanceUpdate, StockRecord,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::storage::SharedStore;

/// Record service wrapping the shared store
#[derive(Clone)]
pub struct RecordService {
    store: SharedStore,
}

/// Exit view: held records waiting to leave and the departure history
#[derive(Debug, Serialize)]
pub struct ExitBoard {
    pub pending: Vec<StockRecord>,
    pub history: Vec<StockRecord>,
}

/// One line of the yard time log with its computed stay
#[derive(Debug, Serialize)]
pub struct PerformanceRow {
    pub id: Uuid,
    pub invoice_number: String,
    pub vehicle_plate: String,
    pub status: String,
    pub arrival_time: Option<String>,
    pub dock_in_time: Option<String>,
    pub dock_out_time: Option<String>,
    pub total_time: Elapsed,
}

impl From<&StockRecord> for PerformanceRow {
    fn from(record: &StockRecord) -> Self {
        Self {
            id: record.id,
            invoice_number: record.invoice_number.clone(),
            vehicle_plate: record.vehicle_plate.clone(),
            status: record.status.wire_name().to_string(),
            arrival_time: record.arrival_time.clone(),
            dock_in_time: record.dock_in_time.clone(),
            dock_out_time: record.dock_out_time.clone(),
            total_time: dwell(record),
        }
    }
}

impl RecordService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Held records matching the entry filter, in collection order
    pub async fn list_entries(&self, filter: &EntryFilter) -> Vec<StockRecord> {
        let store = self.store.read().await;
        filter_held(store.snapshot(), filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get_entry(&self, id: Uuid) -> AppResult<StockRecord> {
        let store = self.store.read().await;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Stock record {}", id)))
    }

    pub async fn create_entry(&self, input: NewStockRecord) -> AppResult<StockRecord> {
        let mut store = self.store.write().await;
        let record = store.register(input)?;
        Ok(record.clone())
    }

    /// Full replacement; the path id wins over the body id
    pub async fn replace_entry(&self, id: Uuid, mut record: StockRecord) -> AppResult<StockRecord> {
        record.id = id;
        let mut store = self.store.write().await;
        let record = store.replace(record)?;
        Ok(record.clone())
    }

    pub async fn exit_board(&self) -> ExitBoard {
        let store = self.store.read().await;
        let (pending, history): (Vec<StockRecord>, Vec<StockRecord>) = store
            .snapshot()
            .iter()
            .cloned()
            .partition(|r| r.status.is_held());
        ExitBoard { pending, history }
    }

    pub async fn record_exit(&self, id: Uuid, exit: &ExitUpdate) -> AppResult<StockRecord> {
        let mut store = self.store.write().await;
        let record = store.record_exit(id, exit)?;
        Ok(record.clone())
    }

    pub async fn performance_rows(&self) -> Vec<PerformanceRow> {
        let store = self.store.read().await;
        store.snapshot().iter().map(PerformanceRow::from).collect()
    }

    pub async fn log_times(&self, id: Uuid, times: &PerformanceUpdate) -> AppResult<StockRecord> {
        let mut store = self.store.write().await;
        let record = store.log_times(id, times)?;
        Ok(record.clone())
    }

    pub async fn billing_records(&self) -> Vec<StockRecord> {
        let store = self.store.read().await;
        store.snapshot().to_vec()
    }

    pub async fn update_billing(&self, id: Uuid, billing: &BillingUpdate) -> AppResult<StockRecord> {
        let mut store = self.store.write().await;
        let record = store.update_billing(id, billing)?;
        Ok(record.clone())
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
