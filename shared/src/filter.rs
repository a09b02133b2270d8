//! Entry list filtering over held records

use chrono::NaiveDate;

use crate::models::StockRecord;
use crate::types::{DateField, EntryFilter};

impl DateField {
    pub fn value_of(&self, record: &StockRecord) -> Option<NaiveDate> {
        match self {
            DateField::InvoiceDate => record.invoice_date,
            DateField::UnloadingDate => record.unloading_date,
        }
    }
}

impl EntryFilter {
    /// Whether a record shows up in the entry list under this filter
    ///
    /// A record without a value for the selected date field is never excluded
    /// by the range; only the status can exclude it.
    pub fn matches(&self, record: &StockRecord) -> bool {
        if !record.status.is_held() || !self.status.accepts(record.status) {
            return false;
        }
        match self.date_field.value_of(record) {
            Some(date) => self.range.contains(date),
            None => true,
        }
    }
}

/// Held records passing `filter`, in collection order
pub fn filter_held<'a>(records: &'a [StockRecord], filter: &EntryFilter) -> Vec<&'a StockRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateRange, StatusFilter};

    fn record(status: &str, invoice_date: Option<&str>, unloading_date: Option<&str>) -> StockRecord {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "status": status,
            "dataNF": invoice_date,
            "dataDescarga": unloading_date,
        }))
        .unwrap()
    }

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    #[test]
    fn test_status_and_range_with_absent_date() {
        let a = record("Estoque", Some("2024-01-05"), None);
        let b = record("Rejeitado", Some("2024-01-10"), None);
        let c = record("Estoque", None, None);
        let records = vec![a.clone(), b, c.clone()];

        let filter = EntryFilter {
            status: StatusFilter::InStock,
            date_field: DateField::InvoiceDate,
            range: DateRange::new(date("2024-01-01"), date("2024-01-07")),
        };
        let result = filter_held(&records, &filter);
        assert_eq!(result, vec![&a, &c]);
    }

    #[test]
    fn test_default_filter_is_identity_over_held() {
        let records = vec![
            record("Estoque", Some("2024-01-05"), None),
            record("Embarcado", Some("2024-01-05"), None),
            record("Rejeitado", None, Some("2023-12-31")),
            record("Devolvido", None, None),
        ];
        let result = filter_held(&records, &EntryFilter::default());
        assert_eq!(result, vec![&records[0], &records[2]]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = vec![
            record("Estoque", None, Some("2024-02-01")),
            record("Estoque", None, Some("2024-02-29")),
            record("Estoque", None, Some("2024-03-01")),
        ];
        let filter = EntryFilter {
            status: StatusFilter::All,
            date_field: DateField::UnloadingDate,
            range: DateRange::new(date("2024-02-01"), date("2024-02-29")),
        };
        assert_eq!(filter_held(&records, &filter).len(), 2);
    }

    #[test]
    fn test_open_ended_range() {
        let records = vec![
            record("Rejeitado", Some("2023-06-01"), None),
            record("Rejeitado", Some("2024-06-01"), None),
        ];
        let filter = EntryFilter {
            status: StatusFilter::Rejected,
            date_field: DateField::InvoiceDate,
            range: DateRange::new(date("2024-01-01"), None),
        };
        assert_eq!(filter_held(&records, &filter), vec![&records[1]]);
    }
}
