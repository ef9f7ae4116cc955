//! Currency converter service.
//!
//! Owns the rate cache and the provider. Refreshes run either inline
//! (`refresh_rates`) or as a spawned task that reports back through a
//! channel (`spawn_refresh`), so the caller's context is the only place a
//! completed refresh is applied.

use std::sync::Arc;
use std::time::Duration;

use abacus_shared::CurrencyCode;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::cache::{RateCache, RefreshCompletion, RefreshTicket, RefreshTrigger};
use super::conversion::{ConversionRequest, ConvertedAmount, convert};
use super::error::{ConversionError, RefreshError};
use super::exchange::RateTable;
use super::provider::RateProvider;

/// Currency converter backed by a rate provider.
pub struct CurrencyConverter<P: RateProvider> {
    provider: Arc<P>,
    cache: RateCache,
    timeout: Duration,
}

impl<P: RateProvider + 'static> CurrencyConverter<P> {
    /// Create a converter with an empty cache.
    #[must_use]
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self::with_provider(Arc::new(provider), timeout)
    }

    /// Create a converter sharing an existing provider.
    #[must_use]
    pub fn with_provider(provider: Arc<P>, timeout: Duration) -> Self {
        Self {
            provider,
            cache: RateCache::new(),
            timeout,
        }
    }

    /// The underlying cache.
    #[must_use]
    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Currently cached rate table.
    #[must_use]
    pub fn rates(&self) -> Option<Arc<RateTable>> {
        self.cache.snapshot()
    }

    /// Fetch rates for `base` and apply them.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Timeout` or `InvalidResponse` if the fetch fails,
    /// or `Superseded` if a later refresh was applied in the meantime. The
    /// cached table is unchanged in every error case.
    pub async fn refresh_rates(&self, base: CurrencyCode) -> Result<Arc<RateTable>, RefreshError> {
        let ticket = self.cache.begin_refresh(base);
        let result = fetch_with_timeout(self.provider.as_ref(), &ticket.base, self.timeout).await;
        self.cache.complete(&ticket, result)
    }

    /// Start a background refresh for `base` after `delay`.
    ///
    /// The outcome is sent to `completions` and must be handed back to
    /// [`CurrencyConverter::complete`] to take effect.
    pub fn spawn_refresh(
        &self,
        base: CurrencyCode,
        trigger: RefreshTrigger,
        delay: Duration,
        completions: UnboundedSender<RefreshCompletion>,
    ) -> RefreshTicket {
        let ticket = self.cache.begin_refresh(base);
        let provider = Arc::clone(&self.provider);
        let timeout = self.timeout;
        let task_ticket = ticket.clone();

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = fetch_with_timeout(provider.as_ref(), &task_ticket.base, timeout).await;
            let completion = RefreshCompletion {
                ticket: task_ticket,
                trigger,
                result,
            };
            if completions.send(completion).is_err() {
                debug!("Refresh completion dropped, receiver closed");
            }
        });

        ticket
    }

    /// Apply a completion received from [`CurrencyConverter::spawn_refresh`].
    ///
    /// # Errors
    ///
    /// Same as [`RateCache::complete`].
    pub fn complete(&self, completion: RefreshCompletion) -> Result<Arc<RateTable>, RefreshError> {
        self.cache.complete(&completion.ticket, completion.result)
    }

    /// Convert with the cached table.
    ///
    /// # Errors
    ///
    /// See [`convert`].
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConvertedAmount, ConversionError> {
        convert(request, self.cache.snapshot().as_deref())
    }
}

async fn fetch_with_timeout<P: RateProvider>(
    provider: &P,
    base: &CurrencyCode,
    timeout: Duration,
) -> Result<RateTable, RefreshError> {
    tokio::time::timeout(timeout, provider.fetch_latest(base))
        .await
        .unwrap_or(Err(RefreshError::Timeout(timeout)))
}
