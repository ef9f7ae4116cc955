//! Exchange rate tables and the provider document they are built from.

use std::collections::BTreeMap;

use abacus_shared::CurrencyCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RefreshError;

/// Snapshot of exchange rates for one base currency and fetch date.
///
/// Either the whole table is valid or it is never constructed: every rate is
/// strictly positive and expressed relative to `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    base: CurrencyCode,
    date: NaiveDate,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl RateTable {
    /// Creates a rate table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the table is empty or any rate is not
    /// strictly positive.
    pub fn new(
        base: CurrencyCode,
        date: NaiveDate,
        rates: BTreeMap<CurrencyCode, Decimal>,
    ) -> Result<Self, RefreshError> {
        if rates.is_empty() {
            return Err(RefreshError::invalid_response("rate table is empty"));
        }
        if let Some((code, rate)) = rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(RefreshError::invalid_response(format!(
                "rate for {code} must be positive, got {rate}"
            )));
        }
        Ok(Self { base, date, rates })
    }

    /// Currency all rates are relative to.
    #[must_use]
    pub const fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Date the provider published these rates for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Rate for `1 base = rate code`, if quoted.
    #[must_use]
    pub fn rate(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// All quoted rates, ordered by currency code.
    #[must_use]
    pub const fn rates(&self) -> &BTreeMap<CurrencyCode, Decimal> {
        &self.rates
    }

    /// Number of quoted currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no currency is quoted. Never the case for a table
    /// built through [`RateTable::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Document returned by the rate provider.
///
/// Only `rates` and `date` are required; `base`, when present, must match
/// the currency that was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesDocument {
    /// Base currency echoed back by the provider.
    #[serde(default)]
    pub base: Option<String>,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Currency code to rate.
    pub rates: BTreeMap<String, Decimal>,
}

impl RatesDocument {
    /// Validate the document and turn it into a rate table for `requested`.
    pub fn into_table(self, requested: &CurrencyCode) -> Result<RateTable, RefreshError> {
        if let Some(base) = &self.base {
            let echoed: CurrencyCode = base.parse().map_err(RefreshError::InvalidResponse)?;
            if &echoed != requested {
                return Err(RefreshError::invalid_response(format!(
                    "requested rates for {requested}, received {echoed}"
                )));
            }
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            RefreshError::invalid_response(format!("bad date '{}': {e}", self.date))
        })?;

        let rates = self
            .rates
            .into_iter()
            .map(|(code, rate)| {
                code.parse::<CurrencyCode>()
                    .map(|code| (code, rate))
                    .map_err(RefreshError::InvalidResponse)
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        RateTable::new(requested.clone(), date, rates)
    }
}
