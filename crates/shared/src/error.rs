//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure of a core operation is converted into one of these at the
/// boundary of the operation; the presentation layer decides how to show it.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed arithmetic expression.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Math-domain violation or out-of-range result.
    #[error("Math domain error: {0}")]
    Domain(String),

    /// Non-numeric or out-of-range financial input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No rate table has been fetched yet.
    #[error("No exchange rates available")]
    NoRatesAvailable,

    /// Currency absent from the current rate table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Rate provider could not be reached or answered with a failure status.
    #[error("Network error: {0}")]
    Network(String),

    /// Rate provider did not answer in time.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Rate provider answered with a document we cannot use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A newer request made this one obsolete.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code used in logs and status lines.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "SYNTAX_ERROR",
            Self::Domain(_) => "DOMAIN_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NoRatesAvailable => "NO_RATES_AVAILABLE",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
