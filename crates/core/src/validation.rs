//! Input validation utilities.
//!
//! Record constructors funnel their raw inputs through these helpers so that every failure is
//! reported the same way: a `tracing` diagnostic naming the field, plus a typed error.

use crate::{ClinicError, ClinicResult};
use clinic_types::{Age, NonEmptyText};

/// Validates that `value` has non-whitespace content.
///
/// # Arguments
///
/// * `field` - Name of the field being validated, used in the error and diagnostic.
/// * `value` - Raw input.
///
/// # Errors
///
/// Returns `ClinicError::EmptyField` if the value is empty or whitespace only.
pub fn required_text(field: &'static str, value: &str) -> ClinicResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|source| {
        tracing::warn!("validation failed: {} cannot be empty", field);
        ClinicError::EmptyField { field, source }
    })
}

/// Validates that `years` is a usable age.
///
/// # Errors
///
/// Returns `ClinicError::Age` if the value is negative or too large.
pub fn valid_age(years: i64) -> ClinicResult<Age> {
    Age::new(years).map_err(|e| {
        tracing::warn!("validation failed: {}", e);
        ClinicError::Age(e)
    })
}

/// Validates that `amount` is a finite number.
///
/// # Errors
///
/// Returns `ClinicError::InvalidAmount` for NaN or infinite values.
pub fn valid_amount(amount: f64) -> ClinicResult<f64> {
    if amount.is_finite() {
        return Ok(amount);
    }
    tracing::warn!("validation failed: amount {} is not finite", amount);
    Err(ClinicError::InvalidAmount(amount))
}
