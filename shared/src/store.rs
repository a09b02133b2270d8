//! Record store: the single source of truth for every view
//!
//! The whole collection is loaded once when the store is opened and written
//! back in full after every successful mutation. A write that cannot be
//! persisted is rolled back so memory never runs ahead of storage.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::StoreError;
use crate::lifecycle::{classify_transition, Transition};
use crate::models::{BillingUpdate, ExitUpdate, NewStockRecord, PerformanceUpdate, StockRecord};

/// Well-known key the collection is stored under
pub const STORAGE_KEY: &str = "stock_data";

/// Version tag written with the collection
pub const FORMAT_VERSION: u32 = 1;

/// Raw storage for the serialized collection
pub trait RecordStorage {
    /// Stored payload, or `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, payload: &str) -> Result<(), StoreError>;
}

impl<T: RecordStorage + ?Sized> RecordStorage for Box<T> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        (**self).save(payload)
    }
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    version: u32,
    records: &'a [StockRecord],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Persisted {
    Versioned {
        version: u32,
        records: Vec<StockRecord>,
    },
    /// Bare array written before the collection carried a version
    Legacy(Vec<StockRecord>),
}

/// Serialize a collection in the persisted format
pub fn encode_collection(records: &[StockRecord]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&PersistedRef {
        version: FORMAT_VERSION,
        records,
    })?)
}

/// Read a persisted collection, versioned or legacy
pub fn decode_collection(payload: &str) -> Result<Vec<StockRecord>, StoreError> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Persisted>(payload) {
        Ok(Persisted::Versioned { version, records }) => {
            if version > FORMAT_VERSION {
                return Err(StoreError::UnsupportedVersion(version));
            }
            Ok(records)
        }
        Ok(Persisted::Legacy(records)) => Ok(records),
        // untagged errors carry no detail; re-parse to report the record problem
        Err(_) => match serde_json::from_str::<Vec<StockRecord>>(payload) {
            Ok(records) => Ok(records),
            Err(e) => Err(StoreError::Serialization(e)),
        },
    }
}

/// In-memory storage, mostly for tests and previews
///
/// Clones share the same payload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    payload: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Arc::new(Mutex::new(Some(payload.into()))),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make subsequent saves fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|p| p.clone())
    }
}

impl RecordStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StoreError> {
        self.payload
            .lock()
            .map(|p| p.clone())
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("memory storage is read-only".to_string()));
        }
        let mut slot = self
            .payload
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        *slot = Some(payload.to_string());
        Ok(())
    }
}

/// Ordered collection of stock records with write-through persistence
pub struct RecordStore<S> {
    storage: S,
    records: Vec<StockRecord>,
}

impl<S: RecordStorage> RecordStore<S> {
    /// Load the collection from `storage`
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let records = match storage.load()? {
            Some(payload) => decode_collection(&payload)?,
            None => Vec::new(),
        };
        tracing::info!("Loaded {} stock records", records.len());
        Ok(Self { storage, records })
    }

    /// Read-only view of the current collection
    pub fn snapshot(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a record at the end of the collection
    pub fn append(&mut self, record: StockRecord) -> Result<&StockRecord, StoreError> {
        if self.get(record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record.normalized());
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Replace the record carrying the same id, keeping its position
    pub fn replace(&mut self, record: StockRecord) -> Result<&StockRecord, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == record.id)
            .ok_or(StoreError::NotFound(record.id))?;

        let transition = classify_transition(self.records[index].status, record.status);
        if transition == Transition::Reentry {
            tracing::debug!("Record {} moved from departed back to held", record.id);
        }

        let previous = std::mem::replace(&mut self.records[index], record.normalized());
        if let Err(e) = self.persist() {
            self.records[index] = previous;
            return Err(e);
        }
        Ok(&self.records[index])
    }

    /// Replace the record `id` with `change` applied to it
    pub fn update<F>(&mut self, id: Uuid, change: F) -> Result<&StockRecord, StoreError>
    where
        F: FnOnce(&StockRecord) -> StockRecord,
    {
        let current = self.get(id).ok_or(StoreError::NotFound(id))?;
        let mut next = change(current);
        next.id = id;
        self.replace(next)
    }

    /// Validate a receipt and store it as a new record
    pub fn register(&mut self, input: NewStockRecord) -> Result<&StockRecord, StoreError> {
        input.validate()?;
        let record = input.into_record();
        tracing::info!(
            "Registered receipt {} (NF {}, status {})",
            record.id,
            record.invoice_number,
            record.status
        );
        self.append(record)
    }

    pub fn record_exit(&mut self, id: Uuid, exit: &ExitUpdate) -> Result<&StockRecord, StoreError> {
        let record = self.update(id, |r| exit.apply(r))?;
        tracing::info!("Record {} left the yard as {}", id, record.status);
        Ok(record)
    }

    pub fn log_times(
        &mut self,
        id: Uuid,
        times: &PerformanceUpdate,
    ) -> Result<&StockRecord, StoreError> {
        self.update(id, |r| times.apply(r))
    }

    pub fn update_billing(
        &mut self,
        id: Uuid,
        billing: &BillingUpdate,
    ) -> Result<&StockRecord, StoreError> {
        self.update(id, |r| billing.apply(r))
    }

    fn persist(&self) -> Result<(), StoreError> {
        let payload = encode_collection(&self.records)?;
        self.storage.save(&payload)?;
        tracing::debug!(
            "Persisted {} stock records ({} bytes)",
            self.records.len(),
            payload.len()
        );
        Ok(())
    }
}
