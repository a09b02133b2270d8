//! HTTP handlers, one module per view

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

pub mod billing;
pub mod dashboard;
pub mod entries;
pub mod exits;
pub mod health;
pub mod performance;

pub use billing::*;
pub use dashboard::*;
pub use entries::*;
pub use exits::*;
pub use health::*;
pub use performance::*;

/// Parse an optional `YYYY-MM-DD` query value; blank means absent
pub(crate) fn parse_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation {
                field: field.to_string(),
                message: format!("'{}' is not a valid date (expected YYYY-MM-DD)", raw),
                message_pt: format!("'{}' não é uma data válida (use AAAA-MM-DD)", raw),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_blank_is_absent() {
        assert_eq!(parse_date("start", None).unwrap(), None);
        assert_eq!(parse_date("start", Some("  ".into())).unwrap(), None);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("end", Some("2024-01-31".into())).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert!(matches!(
            parse_date("end", Some("31/01/2024".into())),
            Err(AppError::Validation { .. })
        ));
    }
}
