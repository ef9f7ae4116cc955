//! Currency conversion and rate refresh errors.

use std::time::Duration;

use abacus_shared::{AppError, CurrencyCode};
use thiserror::Error;

/// Errors that can occur while converting an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No rate table has been fetched yet.
    #[error("no exchange rates available")]
    NoRatesAvailable,

    /// Target currency is not quoted in the current table.
    #[error("no rate for currency {0}")]
    UnknownCurrency(CurrencyCode),

    /// Amount text could not be parsed, or the product does not fit.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl ConversionError {
    /// Text shown in the converter's result line.
    #[must_use]
    pub const fn display_message(&self) -> &'static str {
        match self {
            Self::NoRatesAvailable => "Error: No rates available",
            Self::UnknownCurrency(_) => "Error: Rate not found",
            Self::InvalidAmount(_) => "Error: Please enter a valid amount",
        }
    }
}

/// Errors that can occur while refreshing the rate table.
///
/// A failed refresh never touches the table that is already cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Connection failure or non-success status from the provider.
    #[error("network error: {0}")]
    Network(String),

    /// Provider did not answer within the configured timeout.
    #[error("rate provider did not respond within {0:?}")]
    Timeout(Duration),

    /// Provider answered with a document that is not a usable rate table.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A refresh issued later was applied first; this result is stale.
    #[error("refresh #{sequence} superseded by #{latest}")]
    Superseded {
        /// Sequence number of this refresh.
        sequence: u64,
        /// Sequence number of the table currently cached.
        latest: u64,
    },
}

impl RefreshError {
    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a network error.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::NoRatesAvailable => Self::NoRatesAvailable,
            ConversionError::UnknownCurrency(code) => Self::UnknownCurrency(code.to_string()),
            ConversionError::InvalidAmount(msg) => Self::Validation(msg),
        }
    }
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Network(msg) => Self::Network(msg),
            RefreshError::Timeout(_) => Self::Timeout(err.to_string()),
            RefreshError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            RefreshError::Superseded { .. } => Self::Conflict(err.to_string()),
        }
    }
}
