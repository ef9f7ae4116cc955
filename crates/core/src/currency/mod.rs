//! Currency conversion against a cached, provider-refreshed rate table.

pub mod cache;
pub mod conversion;
pub mod error;
pub mod exchange;
pub mod provider;
pub mod selection;
pub mod service;
pub mod status;

#[cfg(test)]
mod props;

pub use cache::{RateCache, RefreshCompletion, RefreshTicket, RefreshTrigger};
pub use conversion::{ConversionRequest, ConvertedAmount, convert, convert_amount, parse_amount};
pub use error::{ConversionError, RefreshError};
pub use exchange::{RateTable, RatesDocument};
pub use provider::RateProvider;
pub use selection::CurrencySelection;
pub use service::CurrencyConverter;
pub use status::{MessageKind, StatusBoard, TransientMessage};
