//! Financial input validation errors.

use abacus_shared::AppError;
use thiserror::Error;

/// Why a financial input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field left empty.
    #[error("{field} is required")]
    Missing {
        /// Field label.
        field: &'static str,
    },

    /// Field text is not a decimal number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber {
        /// Field label.
        field: &'static str,
        /// Text as entered.
        value: String,
    },

    /// Field text is not a whole number.
    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger {
        /// Field label.
        field: &'static str,
        /// Text as entered.
        value: String,
    },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Field label.
        field: &'static str,
    },

    /// Value below zero where only non-negative values make sense.
    #[error("{field} must not be negative")]
    Negative {
        /// Field label.
        field: &'static str,
    },

    /// Count that must be at least one.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// Field label.
        field: &'static str,
    },

    /// Inputs were valid individually but the formula has no finite result.
    #[error("result is not a finite number")]
    NonFiniteResult,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
