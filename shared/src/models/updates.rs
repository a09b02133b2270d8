//! Field patches issued by the exit, performance and billing views
//!
//! Each patch owns one subset of a record's fields and replaces that subset
//! wholesale, so applying the same patch twice is the same as applying it once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{non_blank, DepartureStatus, StockRecord};

/// Exit registration: the record leaves the yard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExitUpdate {
    pub status: DepartureStatus,
    #[serde(rename = "dataFaturamentoVLI")]
    pub carrier_billing_date: NaiveDate,
    #[serde(rename = "cteVLI", default, skip_serializing_if = "Option::is_none")]
    pub carrier_waybill: Option<String>,
}

/// Yard time log; a missing value clears the stored one
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceUpdate {
    #[serde(rename = "horaChegada", default)]
    pub arrival_time: Option<String>,
    #[serde(rename = "horaEntrada", default)]
    pub dock_in_time: Option<String>,
    #[serde(rename = "horaSaida", default)]
    pub dock_out_time: Option<String>,
}

impl PerformanceUpdate {
    pub fn apply(&self, record: &StockRecord) -> StockRecord {
        StockRecord {
            arrival_time: non_blank(&self.arrival_time),
            dock_in_time: non_blank(&self.dock_in_time),
            dock_out_time: non_blank(&self.dock_out_time),
            ..record.clone()
        }
    }
}

/// Billing reconciliation; a missing value clears the stored one
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillingUpdate {
    #[serde(
        rename = "dataEmissaoNF",
        default,
        deserialize_with = "super::record::wire::optional_date"
    )]
    pub invoice_issued_on: Option<NaiveDate>,
    #[serde(rename = "cteIntertex", default)]
    pub intermediary_waybill: Option<String>,
    #[serde(
        rename = "dataEmissaoCTEIntertex",
        default,
        deserialize_with = "super::record::wire::optional_date"
    )]
    pub intermediary_waybill_issued_on: Option<NaiveDate>,
    #[serde(rename = "cteTransportador", default)]
    pub final_carrier_waybill: Option<String>,
}

impl BillingUpdate {
    pub fn apply(&self, record: &StockRecord) -> StockRecord {
        StockRecord {
            invoice_issued_on: self.invoice_issued_on,
            intermediary_waybill: non_blank(&self.intermediary_waybill),
            intermediary_waybill_issued_on: self.intermediary_waybill_issued_on,
            final_carrier_waybill: non_blank(&self.final_carrier_waybill),
            ..record.clone()
        }
    }
}
