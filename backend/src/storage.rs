//! File-backed storage for the stock collection
//!
//! The collection lives in one JSON file on the local disk. Saves go through
//! a sibling temp file and a rename so a crash mid-write leaves the previous
//! collection intact.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::{RecordStorage, RecordStore, StoreError};
use tokio::sync::RwLock;

/// Store type shared across handlers
pub type SharedStore = Arc<RwLock<RecordStore<Box<dyn RecordStorage + Send + Sync>>>>;

pub fn shared_store(store: RecordStore<Box<dyn RecordStorage + Send + Sync>>) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// Whole-collection JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(path: &Path, err: io::Error) -> StoreError {
    StoreError::Storage(format!("{}: {}", path.display(), err))
}

impl RecordStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    "No stock data at {}, starting with an empty collection",
                    self.path.display()
                );
                Ok(None)
            }
            Err(e) => Err(storage_error(&self.path, e)),
        }
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let temp = self.temp_path();
        fs::write(&temp, payload).map_err(|e| storage_error(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| storage_error(&self.path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("stk-{}", Uuid::new_v4()))
            .join("stock_data.json")
    }

    #[test]
    fn test_missing_file_loads_as_empty() {
        let storage = JsonFileStorage::new(temp_file());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let path = temp_file();
        let storage = JsonFileStorage::new(&path);
        storage.save(r#"{"version":1,"records":[]}"#).unwrap();

        assert_eq!(
            storage.load().unwrap().as_deref(),
            Some(r#"{"version":1,"records":[]}"#)
        );
        assert!(!storage.temp_path().exists());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_store_over_file_reloads() {
        let path = temp_file();
        let payload = r#"[{"id": "5d1f3c1e-2a7b-4c5d-8e9f-0a1b2c3d4e5f", "status": "Estoque", "nf": "42"}]"#;
        let storage = JsonFileStorage::new(&path);
        storage.save(payload).unwrap();

        let store = RecordStore::open(JsonFileStorage::new(&path)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].invoice_number, "42");

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
