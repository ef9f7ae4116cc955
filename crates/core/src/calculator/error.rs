//! Expression evaluation errors.

use abacus_shared::AppError;
use thiserror::Error;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The text is not a well-formed expression.
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// Character offset where the problem was detected.
        position: usize,
        /// What was wrong.
        message: String,
    },

    /// The expression is well-formed but has no real value.
    #[error("math domain error: {0}")]
    Domain(DomainError),

    /// An intermediate or final value is too large for an `f64`.
    #[error("numeric overflow")]
    Overflow,
}

/// Math-domain violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Division (or a negative power) of zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `sqrt` of a negative number.
    #[error("square root of a negative number")]
    NegativeSqrt,

    /// `log` or `ln` of zero or a negative number.
    #[error("logarithm of a non-positive number")]
    NonPositiveLog,

    /// Negative base raised to a fractional power.
    #[error("power has no real result")]
    ComplexPower,
}

impl CalcError {
    /// Create a syntax error.
    #[must_use]
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}

impl From<DomainError> for CalcError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::Syntax { .. } => Self::Syntax(err.to_string()),
            CalcError::Domain(domain) => Self::Domain(domain.to_string()),
            CalcError::Overflow => Self::Domain(err.to_string()),
        }
    }
}
