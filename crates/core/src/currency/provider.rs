//! Rate provider seam.

use abacus_shared::CurrencyCode;

use super::error::RefreshError;
use super::exchange::RateTable;

/// Source of exchange rate tables.
///
/// Implemented by the rates crate over HTTP, and by in-memory fakes in tests.
pub trait RateProvider: Send + Sync {
    /// Fetch the latest rates quoted against `base`.
    ///
    /// Implementations map transport failures to `Network`, and unusable
    /// documents to `InvalidResponse`. Timeouts are enforced by the caller.
    fn fetch_latest(
        &self,
        base: &CurrencyCode,
    ) -> impl std::future::Future<Output = Result<RateTable, RefreshError>> + Send;
}
