//! Stock record models
//!
//! Field names on the wire follow the keys the yard team's browser client has
//! always written to `stock_data`, so existing payloads load unchanged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One physical shipment/lot, from receipt through final disposition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    pub id: Uuid,
    pub status: StockStatus,

    // Receipt facts
    #[serde(rename = "mes", default)]
    pub month: String,
    #[serde(rename = "chaveAcessoNF", default)]
    pub access_key: String,
    #[serde(rename = "nf", default)]
    pub invoice_number: String,
    /// Weight in metric tons
    #[serde(rename = "tonelada", default)]
    pub weight_tons: Decimal,
    #[serde(rename = "valor", default)]
    pub value: Decimal,
    #[serde(rename = "descricaoProduto", default)]
    pub product_description: String,
    #[serde(
        rename = "dataNF",
        default,
        deserialize_with = "wire::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_date: Option<NaiveDate>,
    #[serde(
        rename = "dataDescarga",
        default,
        deserialize_with = "wire::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub unloading_date: Option<NaiveDate>,
    #[serde(rename = "fornecedor", default)]
    pub supplier: String,
    #[serde(rename = "placaVeiculo", default)]
    pub vehicle_plate: String,
    #[serde(default)]
    pub container: String,
    #[serde(rename = "destino", default)]
    pub destination: String,

    // Exit facts
    #[serde(
        rename = "dataFaturamentoVLI",
        default,
        deserialize_with = "wire::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_billing_date: Option<NaiveDate>,
    #[serde(
        rename = "cteVLI",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_waybill: Option<String>,

    // Performance facts (HH:MM, kept verbatim)
    #[serde(
        rename = "horaChegada",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival_time: Option<String>,
    #[serde(
        rename = "horaEntrada",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dock_in_time: Option<String>,
    #[serde(
        rename = "horaSaida",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dock_out_time: Option<String>,

    // Billing facts
    #[serde(
        rename = "dataEmissaoNF",
        default,
        deserialize_with = "wire::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_issued_on: Option<NaiveDate>,
    #[serde(
        rename = "cteIntertex",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub intermediary_waybill: Option<String>,
    #[serde(
        rename = "dataEmissaoCTEIntertex",
        default,
        deserialize_with = "wire::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub intermediary_waybill_issued_on: Option<NaiveDate>,
    #[serde(
        rename = "cteTransportador",
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_carrier_waybill: Option<String>,
}

impl StockRecord {
    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn product_description(&self) -> &str {
        &self.product_description
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blank optional text becomes absent, matching what a reload would read
    pub(crate) fn normalized(self) -> Self {
        Self {
            carrier_waybill: non_blank(&self.carrier_waybill),
            arrival_time: non_blank(&self.arrival_time),
            dock_in_time: non_blank(&self.dock_in_time),
            dock_out_time: non_blank(&self.dock_out_time),
            intermediary_waybill: non_blank(&self.intermediary_waybill),
            final_carrier_waybill: non_blank(&self.final_carrier_waybill),
            ..self
        }
    }
}

/// Where a stock record currently sits in its lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StockStatus {
    #[serde(rename = "Estoque")]
    InStock,
    #[serde(rename = "Rejeitado")]
    Rejected,
    #[serde(rename = "Embarcado")]
    Shipped,
    #[serde(rename = "Devolvido")]
    Returned,
}

impl StockStatus {
    /// Label used by the persisted collection and the browser client
    pub fn wire_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "Estoque",
            StockStatus::Rejected => "Rejeitado",
            StockStatus::Shipped => "Embarcado",
            StockStatus::Returned => "Devolvido",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "Estoque" => Some(StockStatus::InStock),
            "Rejeitado" => Some(StockStatus::Rejected),
            "Embarcado" => Some(StockStatus::Shipped),
            "Devolvido" => Some(StockStatus::Returned),
            _ => None,
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "In Stock"),
            StockStatus::Rejected => write!(f, "Rejected"),
            StockStatus::Shipped => write!(f, "Shipped"),
            StockStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// Status a record may be received with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReceiptStatus {
    #[default]
    #[serde(rename = "Estoque")]
    InStock,
    #[serde(rename = "Rejeitado")]
    Rejected,
}

impl From<ReceiptStatus> for StockStatus {
    fn from(status: ReceiptStatus) -> Self {
        match status {
            ReceiptStatus::InStock => StockStatus::InStock,
            ReceiptStatus::Rejected => StockStatus::Rejected,
        }
    }
}

/// Status an operator picks when a record leaves the yard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DepartureStatus {
    #[default]
    #[serde(rename = "Embarcado")]
    Shipped,
    #[serde(rename = "Devolvido")]
    Returned,
}

impl From<DepartureStatus> for StockStatus {
    fn from(status: DepartureStatus) -> Self {
        match status {
            DepartureStatus::Shipped => StockStatus::Shipped,
            DepartureStatus::Returned => StockStatus::Returned,
        }
    }
}

/// Receipt form input; every field is required
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewStockRecord {
    #[serde(rename = "mes")]
    #[validate(custom = "crate::validation::validate_required")]
    pub month: String,
    #[serde(rename = "chaveAcessoNF")]
    #[validate(custom = "crate::validation::validate_required")]
    pub access_key: String,
    #[serde(rename = "nf")]
    #[validate(custom = "crate::validation::validate_required")]
    pub invoice_number: String,
    #[serde(rename = "tonelada")]
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub weight_tons: Decimal,
    #[serde(rename = "valor")]
    #[validate(custom = "crate::validation::validate_non_negative")]
    pub value: Decimal,
    #[serde(rename = "descricaoProduto")]
    #[validate(custom = "crate::validation::validate_required")]
    pub product_description: String,
    #[serde(rename = "dataNF")]
    pub invoice_date: NaiveDate,
    #[serde(rename = "dataDescarga")]
    pub unloading_date: NaiveDate,
    #[serde(default)]
    pub status: ReceiptStatus,
    #[serde(rename = "fornecedor")]
    #[validate(custom = "crate::validation::validate_required")]
    pub supplier: String,
    #[serde(rename = "placaVeiculo")]
    #[validate(custom = "crate::validation::validate_required")]
    pub vehicle_plate: String,
    #[validate(custom = "crate::validation::validate_required")]
    pub container: String,
    #[serde(rename = "destino")]
    #[validate(custom = "crate::validation::validate_required")]
    pub destination: String,
}

impl NewStockRecord {
    /// Build the stored record, assigning a fresh id
    pub fn into_record(self) -> StockRecord {
        StockRecord {
            id: Uuid::new_v4(),
            status: self.status.into(),
            month: self.month,
            access_key: self.access_key,
            invoice_number: self.invoice_number,
            weight_tons: self.weight_tons,
            value: self.value,
            product_description: self.product_description,
            invoice_date: Some(self.invoice_date),
            unloading_date: Some(self.unloading_date),
            supplier: self.supplier,
            vehicle_plate: self.vehicle_plate,
            container: self.container,
            destination: self.destination,
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
}

/// Treat blank text as absent
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Lenient readers for fields the browser client wrote as `""` when unset
pub(crate) mod wire {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", raw, e))),
        }
    }
}
