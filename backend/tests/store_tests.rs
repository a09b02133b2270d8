//! Record store tests
//!
//! Tests for persistence and field patches including:
//! - Reload yields the identical collection
//! - Legacy bare-array payloads load
//! - Patches are idempotent
//! - Failed writes leave the collection unchanged
//! - Blank text is stored as absent

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::store::{decode_collection, encode_collection};
use shared::{
    BillingUpdate, DepartureStatus, ExitUpdate, MemoryStorage, PerformanceUpdate, RecordStore,
    StockRecord, StockStatus,
};
use uuid::Uuid;

fn blank_record(id: Uuid) -> StockRecord {
    StockRecord {
        id,
        status: StockStatus::InStock,
        month: String::new(),
        access_key: String::new(),
        invoice_number: String::new(),
        weight_tons: Decimal::ZERO,
        value: Decimal::ZERO,
        product_description: String::new(),
        invoice_date: None,
        unloading_date: None,
        supplier: String::new(),
        vehicle_plate: String::new(),
        container: String::new(),
        destination: String::new(),
        carrier_billing_date: None,
        carrier_waybill: None,
        arrival_time: None,
        dock_in_time: None,
        dock_out_time: None,
        invoice_issued_on: None,
        intermediary_waybill: None,
        intermediary_waybill_issued_on: None,
        final_carrier_waybill: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_record_without_optionals_round_trips() {
        let records = vec![blank_record(Uuid::new_v4())];
        let payload = encode_collection(&records).unwrap();
        assert!(payload.starts_with(r#"{"version":1,"#));
        assert_eq!(decode_collection(&payload).unwrap(), records);
    }

    #[test]
    fn test_reopen_sees_appended_records() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::open(storage.clone()).unwrap();
        store.append(blank_record(Uuid::from_u128(1))).unwrap();
        store.append(blank_record(Uuid::from_u128(2))).unwrap();

        let reopened = RecordStore::open(storage).unwrap();
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[test]
    fn test_exit_then_replace_back_to_held_is_accepted() {
        let id = Uuid::from_u128(7);
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        store.append(blank_record(id)).unwrap();

        let exit = ExitUpdate {
            status: DepartureStatus::Shipped,
            carrier_billing_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            carrier_waybill: Some("CT-1".to_string()),
        };
        store.record_exit(id, &exit).unwrap();

        let mut back = store.get(id).unwrap().clone();
        back.status = StockStatus::Rejected;
        let record = store.replace(back).unwrap();
        assert_eq!(record.status, StockStatus::Rejected);
        assert_eq!(record.carrier_waybill.as_deref(), Some("CT-1"));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let id = Uuid::from_u128(3);
        let storage = MemoryStorage::new();
        let mut store = RecordStore::open(storage.clone()).unwrap();
        store.append(blank_record(id)).unwrap();

        storage.set_fail_writes(true);
        let times = PerformanceUpdate {
            arrival_time: Some("08:00".to_string()),
            ..PerformanceUpdate::default()
        };
        assert!(store.log_times(id, &times).is_err());
        assert!(store.append(blank_record(Uuid::from_u128(4))).is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().arrival_time, None);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn text_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[A-Za-z0-9-]{1,12}")
    }

    fn time_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of((0u32..24, 0u32..60).prop_map(|(h, m)| format!("{:02}:{:02}", h, m)))
    }

    fn date_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((0i64..3650).prop_map(|d| {
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(d)
        }))
    }

    fn status_strategy() -> impl Strategy<Value = StockStatus> {
        prop_oneof![
            Just(StockStatus::InStock),
            Just(StockStatus::Rejected),
            Just(StockStatus::Shipped),
            Just(StockStatus::Returned),
        ]
    }

    fn record_strategy() -> impl Strategy<Value = StockRecord> {
        (
            any::<u128>(),
            status_strategy(),
            "[A-Za-z ]{0,10}",
            (0i64..1_000_000).prop_map(|n| Decimal::new(n, 3)),
            date_strategy(),
            date_strategy(),
            text_strategy(),
            (time_strategy(), time_strategy(), time_strategy()),
            (date_strategy(), text_strategy()),
        )
            .prop_map(
                |(id, status, supplier, weight, invoice, billed, waybill, times, billing)| {
                    let mut r = blank_record(Uuid::from_u128(id));
                    r.status = status;
                    r.supplier = supplier;
                    r.weight_tons = weight;
                    r.invoice_date = invoice;
                    r.carrier_billing_date = billed;
                    r.carrier_waybill = waybill;
                    (r.arrival_time, r.dock_in_time, r.dock_out_time) = times;
                    (r.invoice_issued_on, r.intermediary_waybill) = billing;
                    r
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serialize then reload yields the identical collection
        #[test]
        fn prop_collection_round_trips(records in prop::collection::vec(record_strategy(), 0..10)) {
            let payload = encode_collection(&records).unwrap();
            prop_assert_eq!(decode_collection(&payload).unwrap(), records);
        }

        /// Applying a time log twice equals applying it once
        #[test]
        fn prop_performance_patch_idempotent(
            record in record_strategy(),
            arrival in time_strategy(),
            dock_in in time_strategy(),
            dock_out in time_strategy(),
        ) {
            let patch = PerformanceUpdate { arrival_time: arrival, dock_in_time: dock_in, dock_out_time: dock_out };
            let once = patch.apply(&record);
            prop_assert_eq!(patch.apply(&once), once.clone());
            prop_assert_eq!(once.status, record.status);
            prop_assert_eq!(once.carrier_waybill, record.carrier_waybill);
        }

        /// Applying a billing patch twice equals applying it once
        #[test]
        fn prop_billing_patch_idempotent(
            record in record_strategy(),
            issued in date_strategy(),
            intermediary in text_strategy(),
            final_waybill in text_strategy(),
        ) {
            let patch = BillingUpdate {
                invoice_issued_on: issued,
                intermediary_waybill: intermediary,
                intermediary_waybill_issued_on: None,
                final_carrier_waybill: final_waybill,
            };
            let once = patch.apply(&record);
            prop_assert_eq!(patch.apply(&once), once.clone());
            prop_assert_eq!(once.arrival_time, record.arrival_time);
        }

        /// An exit always lands in a departed status with its billing date
        #[test]
        fn prop_exit_departs(record in record_strategy(), returned in any::<bool>(), day in 0i64..365) {
            let exit = ExitUpdate {
                status: if returned { DepartureStatus::Returned } else { DepartureStatus::Shipped },
                carrier_billing_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day),
                carrier_waybill: None,
            };
            let once = exit.apply(&record);
            prop_assert!(once.status.is_departed());
            prop_assert_eq!(once.carrier_billing_date, Some(exit.carrier_billing_date));
            prop_assert_eq!(exit.apply(&once), once.clone());
        }

        /// Whatever blank text goes in, a reopened store sees the same records
        #[test]
        fn prop_store_reopens_equal(
            records in prop::collection::vec(record_strategy(), 0..6),
            waybills in prop::collection::vec(prop::option::of("[ ]{0,3}|[A-Z0-9-]{1,8}"), 6),
        ) {
            let storage = MemoryStorage::new();
            let mut store = RecordStore::open(storage.clone()).unwrap();
            for (index, (mut record, waybill)) in records.into_iter().zip(waybills).enumerate() {
                record.id = Uuid::from_u128(index as u128 + 1);
                record.final_carrier_waybill = waybill;
                store.append(record).unwrap();
            }
            let reopened = RecordStore::open(storage).unwrap();
            prop_assert_eq!(reopened.snapshot(), store.snapshot());
        }
    }
}
