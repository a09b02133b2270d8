//! WebAssembly module for the STK Manager yard views
//!
//! Provides client-side computation for:
//! - Yard stay durations
//! - Dashboard metrics
//! - Entry list filtering
//! - A record store persisted in the browser's `localStorage`
//!
//! Records cross the boundary as JSON strings in the persisted wire format.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    aggregation::{self, DashboardOptions},
    duration,
    filter::filter_held,
    performance::summarize_performance,
    store::{decode_collection, STORAGE_KEY},
    BillingUpdate, EntryFilter, ExitUpdate, NewStockRecord, PerformanceUpdate, RecordStorage,
    RecordStore, StockRecord, StockStatus, StoreError,
};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn parse_id(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|e| format!("Invalid record id '{}': {}", id, e))
}

fn entry_filter(filter_json: &str) -> Result<EntryFilter, String> {
    if filter_json.trim().is_empty() {
        return Ok(EntryFilter::default());
    }
    parse("filter", filter_json)
}

fn options(top_n: Option<usize>, destination_top_n: Option<usize>) -> DashboardOptions {
    let defaults = DashboardOptions::default();
    DashboardOptions {
        top_n: top_n.unwrap_or(defaults.top_n),
        destination_top_n: destination_top_n.unwrap_or(defaults.destination_top_n),
    }
}

/// Elapsed time between two `HH:MM` values, `"-"` when unavailable
#[wasm_bindgen]
pub fn calculate_duration(start: Option<String>, end: Option<String>) -> String {
    duration::duration(start.as_deref(), end.as_deref()).to_string()
}

/// Whether a wire status (`Estoque`, `Rejeitado`, ...) is still in the yard
#[wasm_bindgen]
pub fn is_held_status(status: &str) -> bool {
    StockStatus::from_wire_name(status).map_or(false, |s| s.is_held())
}

/// Dashboard summary for a persisted collection (envelope or bare array)
#[wasm_bindgen]
pub fn dashboard_summary(
    records_json: &str,
    top_n: Option<usize>,
    destination_top_n: Option<usize>,
) -> Result<String, JsValue> {
    let records = decode_collection(records_json).map_err(js_error)?;
    to_json(&aggregation::summarize(
        &records,
        &options(top_n, destination_top_n),
    ))
}

/// Held records matching a filter such as
/// `{"status": "in_stock", "date_field": "unloading_date", "start": "2024-01-01"}`
#[wasm_bindgen]
pub fn filter_entries(records_json: &str, filter_json: &str) -> Result<String, JsValue> {
    let records = decode_collection(records_json).map_err(js_error)?;
    let filter = entry_filter(filter_json).map_err(js_error)?;
    to_json(&filter_held(&records, &filter))
}

/// `localStorage` slot holding the whole collection
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Storage("no browser window".to_string()))?
            .local_storage()
            .map_err(|_| StoreError::Storage("localStorage is not accessible".to_string()))?
            .ok_or_else(|| StoreError::Storage("localStorage is not available".to_string()))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl RecordStorage for LocalStorage {
    fn load(&self) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|_| StoreError::Storage(format!("cannot read '{}'", self.key)))
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.key, payload)
            .map_err(|_| StoreError::Storage(format!("cannot write '{}' (quota exceeded?)", self.key)))
    }
}

/// Record store for the browser views
#[wasm_bindgen]
pub struct StockApp {
    store: RecordStore<Box<dyn RecordStorage>>,
}

#[wasm_bindgen]
impl StockApp {
    /// Open the collection kept in `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<StockApp, JsValue> {
        let app = Self::with_storage(Box::new(LocalStorage::default())).map_err(js_error)?;
        web_sys::console::log_1(&format!("Loaded {} stock records", app.store.len()).into());
        Ok(app)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Every record, in collection order
    pub fn records(&self) -> Result<String, JsValue> {
        to_json(self.store.snapshot())
    }

    /// Held records matching the filter; an empty string means no filter
    pub fn entries(&self, filter_json: &str) -> Result<String, JsValue> {
        let filter = entry_filter(filter_json).map_err(js_error)?;
        to_json(&filter_held(self.store.snapshot(), &filter))
    }

    /// Held records waiting for an exit
    pub fn pending_exits(&self) -> Result<String, JsValue> {
        let pending: Vec<&StockRecord> = self
            .store
            .snapshot()
            .iter()
            .filter(|r| r.status.is_held())
            .collect();
        to_json(&pending)
    }

    /// Departed records
    pub fn exit_history(&self) -> Result<String, JsValue> {
        let history: Vec<&StockRecord> = self
            .store
            .snapshot()
            .iter()
            .filter(|r| r.status.is_departed())
            .collect();
        to_json(&history)
    }

    pub fn add_entry(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewStockRecord = parse("entry", input_json).map_err(js_error)?;
        let record = self.store.register(input).map_err(js_error)?;
        to_json(record)
    }

    pub fn replace_entry(&mut self, record_json: &str) -> Result<String, JsValue> {
        let record: StockRecord = parse("record", record_json).map_err(js_error)?;
        let record = self.store.replace(record).map_err(js_error)?;
        to_json(record)
    }

    pub fn record_exit(&mut self, id: &str, exit_json: &str) -> Result<String, JsValue> {
        let id = parse_id(id).map_err(js_error)?;
        let exit: ExitUpdate = parse("exit", exit_json).map_err(js_error)?;
        let record = self.store.record_exit(id, &exit).map_err(js_error)?;
        to_json(record)
    }

    pub fn log_times(&mut self, id: &str, times_json: &str) -> Result<String, JsValue> {
        let id = parse_id(id).map_err(js_error)?;
        let times: PerformanceUpdate = parse("times", times_json).map_err(js_error)?;
        let record = self.store.log_times(id, &times).map_err(js_error)?;
        to_json(record)
    }

    pub fn update_billing(&mut self, id: &str, billing_json: &str) -> Result<String, JsValue> {
        let id = parse_id(id).map_err(js_error)?;
        let billing: BillingUpdate = parse("billing", billing_json).map_err(js_error)?;
        let record = self.store.update_billing(id, &billing).map_err(js_error)?;
        to_json(record)
    }

    pub fn dashboard(
        &self,
        top_n: Option<usize>,
        destination_top_n: Option<usize>,
    ) -> Result<String, JsValue> {
        to_json(&aggregation::summarize(
            self.store.snapshot(),
            &options(top_n, destination_top_n),
        ))
    }

    /// Yard KPIs; `day` is `YYYY-MM-DD`, today when omitted
    pub fn performance(&self, day: Option<String>) -> Result<String, JsValue> {
        let day = match day.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(js_error)?,
            None => today().ok_or_else(|| js_error("cannot read the current date"))?,
        };
        to_json(&summarize_performance(self.store.snapshot(), day))
    }
}

impl StockApp {
    /// Open over any storage backend
    pub fn with_storage(storage: Box<dyn RecordStorage>) -> Result<StockApp, StoreError> {
        Ok(Self {
            store: RecordStore::open(storage)?,
        })
    }
}

fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MemoryStorage;

    const RECORDS: &str = r#"[
        {"id": "00000000-0000-0000-0000-000000000001", "status": "Estoque", "nf": "A",
         "fornecedor": "ACME", "dataNF": "2024-01-05"},
        {"id": "00000000-0000-0000-0000-000000000002", "status": "Rejeitado", "nf": "B",
         "fornecedor": "", "dataNF": "2024-01-10"},
        {"id": "00000000-0000-0000-0000-000000000003", "status": "Estoque", "nf": "C",
         "fornecedor": "ACME", "dataNF": ""},
        {"id": "00000000-0000-0000-0000-000000000004", "status": "Embarcado", "nf": "D"}
    ]"#;

    fn app() -> StockApp {
        StockApp::with_storage(Box::new(MemoryStorage::with_payload(RECORDS))).unwrap()
    }

    fn nfs(json: &str) -> Vec<String> {
        let records: Vec<StockRecord> = serde_json::from_str(json).unwrap();
        records.into_iter().map(|r| r.invoice_number).collect()
    }

    #[test]
    fn test_calculate_duration() {
        assert_eq!(calculate_duration(Some("08:00".into()), Some("10:30".into())), "2h 30m");
        assert_eq!(calculate_duration(Some("10:00".into()), Some("09:00".into())), "-");
        assert_eq!(calculate_duration(None, Some("09:00".into())), "-");
    }

    #[test]
    fn test_is_held_status() {
        assert!(is_held_status("Estoque"));
        assert!(is_held_status("Rejeitado"));
        assert!(!is_held_status("Embarcado"));
        assert!(!is_held_status("Devolvido"));
        assert!(!is_held_status("estoque"));
    }

    #[test]
    fn test_dashboard_summary() {
        let json = dashboard_summary(RECORDS, None, None).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(summary["held_count"], 3);
        assert_eq!(summary["departed_count"], 1);
        let turnover: f64 = summary["turnover_ratio"].as_str().unwrap().parse().unwrap();
        assert_eq!(turnover, 25.0);
        assert_eq!(summary["by_supplier"][0]["key"], "ACME");
        assert_eq!(summary["by_supplier"][1]["key"], "Not Informed");
    }

    #[test]
    fn test_filter_entries() {
        let filter = r#"{"status": "in_stock", "start": "2024-01-01", "end": "2024-01-07"}"#;
        let json = filter_entries(RECORDS, filter).unwrap();
        assert_eq!(nfs(&json), vec!["A", "C"]);

        let json = filter_entries(RECORDS, "").unwrap();
        assert_eq!(nfs(&json), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_entry_filter_reports_bad_json() {
        assert!(entry_filter("{\"status\": \"shipped\"}").is_err());
        assert!(parse_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_stock_app_exit_flow() {
        let mut app = app();
        assert_eq!(nfs(&app.pending_exits().unwrap()), vec!["A", "B", "C"]);

        app.record_exit(
            "00000000-0000-0000-0000-000000000002",
            r#"{"status": "Devolvido", "dataFaturamentoVLI": "2024-02-01"}"#,
        )
        .unwrap();

        assert_eq!(nfs(&app.pending_exits().unwrap()), vec!["A", "C"]);
        assert_eq!(nfs(&app.exit_history().unwrap()), vec!["B", "D"]);
    }

    #[test]
    fn test_stock_app_times_and_performance() {
        let mut app = app();
        let json = app
            .log_times(
                "00000000-0000-0000-0000-000000000001",
                r#"{"horaChegada": "07:15", "horaSaida": "11:45"}"#,
            )
            .unwrap();
        let record: StockRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.dock_in_time, None);

        let summary: serde_json::Value =
            serde_json::from_str(&app.performance(Some("2024-01-05".into())).unwrap()).unwrap();
        assert_eq!(summary["average_stay"], "4h 30m");
        assert_eq!(summary["in_operation"], 0);
    }

    #[test]
    fn test_stock_app_add_entry() {
        let storage = MemoryStorage::new();
        let mut app = StockApp::with_storage(Box::new(storage.clone())).unwrap();
        assert!(app.is_empty());

        let input = r#"{
            "mes": "Janeiro", "chaveAcessoNF": "3524", "nf": "77", "tonelada": 28.4,
            "valor": 15000, "descricaoProduto": "Soja", "dataNF": "2024-01-03",
            "dataDescarga": "2024-01-04", "status": "Rejeitado", "fornecedor": "ACME",
            "placaVeiculo": "ABC1D23", "container": "MSCU1", "destino": "Santos"
        }"#;
        app.add_entry(input).unwrap();

        assert_eq!(app.len(), 1);
        let reopened = StockApp::with_storage(Box::new(storage)).unwrap();
        assert_eq!(nfs(&reopened.records().unwrap()), vec!["77"]);
    }
}
