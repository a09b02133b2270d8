//! Validation rules for receipt input
//!
//! Only presence is checked for text fields. Weight and value must also be
//! non-negative; aggregation assumes as much.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Text must contain something other than whitespace
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}

/// Weights and monetary values cannot be negative
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Value cannot be negative".into());
        return Err(error);
    }
    Ok(())
}
