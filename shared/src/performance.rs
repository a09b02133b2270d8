//! Yard performance figures derived from the time log

use chrono::NaiveDate;

use crate::duration::{duration, Elapsed};
use crate::models::{PerformanceSummary, StockRecord};

/// Total stay in the yard: arrival to dock-out
pub fn dwell(record: &StockRecord) -> Elapsed {
    duration(record.arrival_time.as_deref(), record.dock_out_time.as_deref())
}

/// Still in the yard, arrived but not yet out of the dock
pub fn is_in_operation(record: &StockRecord) -> bool {
    record.status.is_held() && record.arrival_time.is_some() && record.dock_out_time.is_none()
}

/// Mean measurable stay, truncated to whole minutes
pub fn average_stay(records: &[StockRecord]) -> Elapsed {
    let stays: Vec<u32> = records
        .iter()
        .filter_map(|r| dwell(r).total_minutes())
        .collect();
    if stays.is_empty() {
        return Elapsed::Unavailable;
    }
    let total: u64 = stays.iter().map(|&m| u64::from(m)).sum();
    let mean = total / stays.len() as u64;
    u32::try_from(mean)
        .map(Elapsed::from_minutes)
        .unwrap_or(Elapsed::Unavailable)
}

pub fn summarize_performance(records: &[StockRecord], day: NaiveDate) -> PerformanceSummary {
    PerformanceSummary {
        average_stay: average_stay(records),
        in_operation: records.iter().filter(|r| is_in_operation(r)).count(),
        loads_on_day: records
            .iter()
            .filter(|r| r.unloading_date == Some(day))
            .count(),
    }
}
