//! Status lifecycle rules
//!
//! A record is received as held (in stock or rejected) and leaves the yard
//! when the exit module marks it shipped or returned. Nothing here rejects a
//! move: going from departed back to held is accepted as a plain field update.

use serde::Serialize;

use crate::models::{ExitUpdate, StockRecord, StockStatus};

impl StockStatus {
    /// Physically present in the facility
    pub fn is_held(&self) -> bool {
        matches!(self, StockStatus::InStock | StockStatus::Rejected)
    }

    /// Has left the facility
    pub fn is_departed(&self) -> bool {
        matches!(self, StockStatus::Shipped | StockStatus::Returned)
    }
}

/// Kind of status change between two record values
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Held to departed
    Departure,
    /// Departed back to held
    Reentry,
    /// Between two held or two departed statuses
    Reclassification,
    Unchanged,
}

pub fn classify_transition(from: StockStatus, to: StockStatus) -> Transition {
    if from == to {
        Transition::Unchanged
    } else if from.is_held() && to.is_departed() {
        Transition::Departure
    } else if from.is_departed() && to.is_held() {
        Transition::Reentry
    } else {
        Transition::Reclassification
    }
}

impl ExitUpdate {
    /// Record value after registering the exit
    pub fn apply(&self, record: &StockRecord) -> StockRecord {
        StockRecord {
            status: self.status.into(),
            carrier_billing_date: Some(self.carrier_billing_date),
            carrier_waybill: crate::models::non_blank(&self.carrier_waybill),
            ..record.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepartureStatus;
    use chrono::NaiveDate;

    const ALL: [StockStatus; 4] = [
        StockStatus::InStock,
        StockStatus::Rejected,
        StockStatus::Shipped,
        StockStatus::Returned,
    ];

    #[test]
    fn test_held_and_departed_partition_statuses() {
        for status in ALL {
            assert_ne!(status.is_held(), status.is_departed());
        }
        assert!(StockStatus::InStock.is_held());
        assert!(StockStatus::Rejected.is_held());
        assert!(StockStatus::Shipped.is_departed());
        assert!(StockStatus::Returned.is_departed());
    }

    #[test]
    fn test_classify_transition() {
        use StockStatus::*;
        assert_eq!(classify_transition(InStock, Shipped), Transition::Departure);
        assert_eq!(classify_transition(Rejected, Returned), Transition::Departure);
        assert_eq!(classify_transition(Shipped, InStock), Transition::Reentry);
        assert_eq!(classify_transition(InStock, Rejected), Transition::Reclassification);
        assert_eq!(classify_transition(Shipped, Returned), Transition::Reclassification);
        assert_eq!(classify_transition(Returned, Returned), Transition::Unchanged);
    }

    #[test]
    fn test_exit_sets_status_and_exit_facts() {
        let record: StockRecord = serde_json::from_str(
            r#"{"id": "3a0c0f2e-1b7d-4d8e-8a6c-0d2b9e4f7c55", "status": "Rejeitado", "horaChegada": "08:10"}"#,
        )
        .unwrap();
        let exit = ExitUpdate {
            status: DepartureStatus::Returned,
            carrier_billing_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            carrier_waybill: Some("  ".to_string()),
        };

        let departed = exit.apply(&record);
        assert_eq!(departed.status, StockStatus::Returned);
        assert_eq!(departed.carrier_billing_date, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(departed.carrier_waybill, None);
        assert_eq!(departed.arrival_time.as_deref(), Some("08:10"));
        assert_eq!(exit.apply(&departed), departed);
    }
}
