//! Dashboard and performance summaries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::duration::Elapsed;

/// Count/weight bucket of held records sharing one field value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    /// Summed weight in tons, rounded to two decimals
    pub weight: Decimal,
}

/// Held records at one destination, split by status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DestinationStatus {
    pub destination: String,
    pub in_stock: usize,
    pub rejected: usize,
}

impl DestinationStatus {
    pub fn total(&self) -> usize {
        self.in_stock + self.rejected
    }
}

/// Every dashboard metric, computed from one snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub held_count: usize,
    pub held_weight: Decimal,
    pub held_value: Decimal,
    pub departed_count: usize,
    /// Percentage of all records that have departed (0-100, one decimal)
    pub turnover_ratio: Decimal,
    pub by_supplier: Vec<GroupSummary>,
    pub by_destination: Vec<GroupSummary>,
    pub by_product: Vec<GroupSummary>,
    pub status_by_destination: Vec<DestinationStatus>,
}

/// Yard performance KPIs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceSummary {
    pub average_stay: Elapsed,
    /// Records with an arrival time and no dock-out time yet
    pub in_operation: usize,
    /// Records unloaded on the reference day
    pub loads_on_day: usize,
}
