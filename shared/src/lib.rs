//! Shared domain core for the STK Manager yard tool
//!
//! This crate holds the stock record model, its lifecycle rules, the
//! dashboard aggregations, the entry filter, the yard duration calculator and
//! the record store. It is used by the local server and by the browser
//! bindings (via WASM).

pub mod aggregation;
pub mod duration;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod models;
pub mod performance;
pub mod store;
pub mod types;
pub mod validation;

pub use error::StoreError;
pub use models::*;
pub use store::{MemoryStorage, RecordStorage, RecordStore};
pub use types::*;
