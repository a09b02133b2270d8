//! Common types used across the workspace

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::StockStatus;

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Which receipt date the entry list range applies to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    #[default]
    InvoiceDate,
    UnloadingDate,
}

/// Status narrowing for the entry list (held statuses only)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    InStock,
    Rejected,
}

impl StatusFilter {
    pub fn accepts(&self, status: StockStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::InStock => status == StockStatus::InStock,
            StatusFilter::Rejected => status == StockStatus::Rejected,
        }
    }
}

/// Entry list filter; the default is the identity over held records
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryFilter {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub date_field: DateField,
    #[serde(default, flatten)]
    pub range: DateRange,
}
