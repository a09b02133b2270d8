//! Dashboard aggregation over a record snapshot
//!
//! Everything is recomputed from the full collection on each call; there is
//! no cached or incremental state.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{DashboardSummary, DestinationStatus, GroupSummary, StockRecord, StockStatus};

/// Group label for records whose field is empty
pub const NOT_INFORMED: &str = "Not Informed";

/// Typed accessor used to bucket records
pub type GroupAccessor = fn(&StockRecord) -> &str;

/// Fields the dashboard can group held records by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Supplier,
    Destination,
    Product,
    Month,
    Container,
}

impl GroupField {
    pub fn accessor(&self) -> GroupAccessor {
        match self {
            GroupField::Supplier => StockRecord::supplier,
            GroupField::Destination => StockRecord::destination,
            GroupField::Product => StockRecord::product_description,
            GroupField::Month => StockRecord::month,
            GroupField::Container => StockRecord::container,
        }
    }
}

/// Truncation limits for the dashboard breakdowns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardOptions {
    pub top_n: usize,
    pub destination_top_n: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            destination_top_n: 6,
        }
    }
}

fn held(records: &[StockRecord]) -> impl Iterator<Item = &StockRecord> {
    records.iter().filter(|r| r.status.is_held())
}

fn group_label(value: &str) -> &str {
    if value.is_empty() {
        NOT_INFORMED
    } else {
        value
    }
}

fn round_weight(weight: Decimal) -> Decimal {
    weight.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn total_held_count(records: &[StockRecord]) -> usize {
    held(records).count()
}

pub fn total_held_weight(records: &[StockRecord]) -> Decimal {
    held(records).map(|r| r.weight_tons).sum()
}

pub fn total_held_value(records: &[StockRecord]) -> Decimal {
    held(records).map(|r| r.value).sum()
}

pub fn total_departed_count(records: &[StockRecord]) -> usize {
    records.iter().filter(|r| r.status.is_departed()).count()
}

/// Departed share of all records, as a percentage with one decimal
pub fn turnover_ratio(records: &[StockRecord]) -> Decimal {
    turnover_ratio_from(total_held_count(records), total_departed_count(records))
}

pub fn turnover_ratio_from(held_count: usize, departed_count: usize) -> Decimal {
    let total = held_count + departed_count;
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(departed_count) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Bucket held records by `key`, most populated first
///
/// Groups with equal counts keep the order in which their key was first seen.
pub fn group_by<F>(records: &[StockRecord], key: F) -> Vec<GroupSummary>
where
    F: Fn(&StockRecord) -> &str,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupSummary> = Vec::new();

    for record in held(records) {
        let label = group_label(key(record));
        match index.get(label) {
            Some(&i) => {
                groups[i].count += 1;
                groups[i].weight += record.weight_tons;
            }
            None => {
                index.insert(label.to_string(), groups.len());
                groups.push(GroupSummary {
                    key: label.to_string(),
                    count: 1,
                    weight: record.weight_tons,
                });
            }
        }
    }

    for group in &mut groups {
        group.weight = round_weight(group.weight);
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

/// `group_by` truncated to the `limit` largest groups
pub fn top_groups<F>(records: &[StockRecord], key: F, limit: usize) -> Vec<GroupSummary>
where
    F: Fn(&StockRecord) -> &str,
{
    let mut groups = group_by(records, key);
    groups.truncate(limit);
    groups
}

/// In-stock vs rejected counts for the `limit` busiest destinations
pub fn status_by_destination(records: &[StockRecord], limit: usize) -> Vec<DestinationStatus> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<DestinationStatus> = Vec::new();

    for record in held(records) {
        let label = group_label(&record.destination);
        let i = match index.get(label) {
            Some(&i) => i,
            None => {
                index.insert(label.to_string(), rows.len());
                rows.push(DestinationStatus {
                    destination: label.to_string(),
                    in_stock: 0,
                    rejected: 0,
                });
                rows.len() - 1
            }
        };
        match record.status {
            StockStatus::InStock => rows[i].in_stock += 1,
            StockStatus::Rejected => rows[i].rejected += 1,
            StockStatus::Shipped | StockStatus::Returned => {}
        }
    }

    rows.sort_by(|a, b| b.total().cmp(&a.total()));
    rows.truncate(limit);
    rows
}

/// Compute every dashboard metric from one snapshot
pub fn summarize(records: &[StockRecord], options: &DashboardOptions) -> DashboardSummary {
    let held_count = total_held_count(records);
    let departed_count = total_departed_count(records);

    DashboardSummary {
        held_count,
        held_weight: total_held_weight(records),
        held_value: total_held_value(records),
        departed_count,
        turnover_ratio: turnover_ratio_from(held_count, departed_count),
        by_supplier: top_groups(records, StockRecord::supplier, options.top_n),
        by_destination: top_groups(records, StockRecord::destination, options.top_n),
        by_product: top_groups(records, StockRecord::product_description, options.top_n),
        status_by_destination: status_by_destination(records, options.destination_top_n),
    }
}
