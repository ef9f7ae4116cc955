//! Cached rate table with last-write-wins refresh ordering.
//!
//! Every refresh is stamped with a sequence number when it is issued. A
//! completed refresh replaces the cached table only if no later-issued
//! refresh has been applied already, so overlapping requests settle on the
//! one the user asked for last regardless of which response arrives first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use abacus_shared::{AppError, CurrencyCode};
use tracing::{debug, info, warn};

use super::error::RefreshError;
use super::exchange::RateTable;

/// What caused a refresh to be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Initial fetch shortly after launch.
    Startup,
    /// User pressed the update button.
    Manual,
    /// User selected a different source currency.
    BaseChanged,
}

/// Handle for one issued refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    /// Issue order; strictly increasing per cache.
    pub sequence: u64,
    /// Base currency requested.
    pub base: CurrencyCode,
}

/// Outcome of a background refresh, delivered back to the owning context.
#[derive(Debug, Clone)]
pub struct RefreshCompletion {
    /// Ticket issued when the refresh started.
    pub ticket: RefreshTicket,
    /// Why it was issued.
    pub trigger: RefreshTrigger,
    /// Fetched table or failure.
    pub result: Result<RateTable, RefreshError>,
}

#[derive(Debug, Default)]
struct CacheState {
    table: Option<Arc<RateTable>>,
    applied: u64,
}

/// Holder of the most recently applied rate table.
///
/// Readers get an `Arc` snapshot; a table is swapped in whole or not at all.
#[derive(Debug, Default)]
pub struct RateCache {
    state: RwLock<CacheState>,
    issued: AtomicU64,
}

impl RateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new refresh for `base`.
    pub fn begin_refresh(&self, base: CurrencyCode) -> RefreshTicket {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(sequence, base = %base, "Refresh issued");
        RefreshTicket { sequence, base }
    }

    /// Apply the result of a refresh.
    ///
    /// On success the table replaces the cached one, unless a refresh issued
    /// after `ticket` has already been applied. Errors leave the cache as is.
    ///
    /// # Errors
    ///
    /// Returns `Superseded` for any result, table or failure, whose refresh
    /// was issued before the applied one; otherwise the fetch error unchanged.
    pub fn complete(
        &self,
        ticket: &RefreshTicket,
        result: Result<RateTable, RefreshError>,
    ) -> Result<Arc<RateTable>, RefreshError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if let Err(err) = &result {
            let app_err = AppError::from(err.clone());
            warn!(
                sequence = ticket.sequence,
                base = %ticket.base,
                code = app_err.error_code(),
                retryable = app_err.is_retryable(),
                error = %err,
                "Rate refresh failed"
            );
        }

        if ticket.sequence <= state.applied {
            debug!(
                sequence = ticket.sequence,
                latest = state.applied,
                "Discarding stale refresh result"
            );
            return Err(RefreshError::Superseded {
                sequence: ticket.sequence,
                latest: state.applied,
            });
        }

        let table = result?;
        let table = Arc::new(table);
        state.table = Some(Arc::clone(&table));
        state.applied = ticket.sequence;
        info!(
            sequence = ticket.sequence,
            base = %table.base(),
            date = %table.date(),
            currencies = table.len(),
            "Rate table updated"
        );
        Ok(table)
    }

    /// Currently cached table, if any refresh has succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<RateTable>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .table
            .clone()
    }

    /// Sequence number of the cached table; zero before the first success.
    #[must_use]
    pub fn applied_sequence(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .applied
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn table(base: &str, inr: rust_decimal::Decimal) -> RateTable {
        RateTable::new(
            code(base),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            BTreeMap::from([(code("INR"), inr)]),
        )
        .unwrap()
    }

    #[test]
    fn test_sequences_increase() {
        let cache = RateCache::new();
        let first = cache.begin_refresh(code("USD"));
        let second = cache.begin_refresh(code("EUR"));
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(cache.applied_sequence(), 0);
    }

    #[test]
    fn test_success_replaces_table() {
        let cache = RateCache::new();
        assert!(cache.snapshot().is_none());

        let ticket = cache.begin_refresh(code("USD"));
        let applied = cache.complete(&ticket, Ok(table("USD", dec!(83)))).unwrap();

        assert_eq!(cache.snapshot().as_deref(), Some(applied.as_ref()));
        assert_eq!(cache.applied_sequence(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_table() {
        let cache = RateCache::new();
        let ticket = cache.begin_refresh(code("USD"));
        let before = cache.complete(&ticket, Ok(table("USD", dec!(83)))).unwrap();

        let ticket = cache.begin_refresh(code("USD"));
        let err = cache
            .complete(&ticket, Err(RefreshError::network("connection refused")))
            .unwrap_err();

        assert_eq!(err, RefreshError::network("connection refused"));
        let after = cache.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(cache.applied_sequence(), 1);
    }

    #[test]
    fn test_late_stale_response_is_discarded() {
        let cache = RateCache::new();
        let usd = cache.begin_refresh(code("USD"));
        let eur = cache.begin_refresh(code("EUR"));

        // Later request finishes first
        cache.complete(&eur, Ok(table("EUR", dec!(90)))).unwrap();
        let err = cache.complete(&usd, Ok(table("USD", dec!(83)))).unwrap_err();

        assert_eq!(
            err,
            RefreshError::Superseded {
                sequence: 1,
                latest: 2
            }
        );
        assert_eq!(cache.snapshot().unwrap().base(), &code("EUR"));
    }

    #[test]
    fn test_late_stale_failure_is_superseded() {
        let cache = RateCache::new();
        let usd = cache.begin_refresh(code("USD"));
        let eur = cache.begin_refresh(code("EUR"));

        let applied = cache.complete(&eur, Ok(table("EUR", dec!(90)))).unwrap();
        let err = cache
            .complete(&usd, Err(RefreshError::network("connection reset")))
            .unwrap_err();

        assert_eq!(
            err,
            RefreshError::Superseded {
                sequence: 1,
                latest: 2
            }
        );
        assert!(Arc::ptr_eq(&applied, &cache.snapshot().unwrap()));
    }

    #[test]
    fn test_in_order_completion_applies_both() {
        let cache = RateCache::new();
        let usd = cache.begin_refresh(code("USD"));
        let eur = cache.begin_refresh(code("EUR"));

        cache.complete(&usd, Ok(table("USD", dec!(83)))).unwrap();
        cache.complete(&eur, Ok(table("EUR", dec!(90)))).unwrap();

        assert_eq!(cache.snapshot().unwrap().base(), &code("EUR"));
        assert_eq!(cache.applied_sequence(), 2);
    }
}
