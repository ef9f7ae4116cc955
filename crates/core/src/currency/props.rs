//! Property-based tests for currency operations.
//!
//! - Property 1: Banker's Rounding Correctness
//! - Property 2: Conversion Display Consistency
//! - Property 3: Last-Issued Refresh Wins

use std::collections::BTreeMap;

use abacus_shared::CurrencyCode;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::cache::RateCache;
use super::conversion::{ConversionRequest, convert, convert_amount};
use super::error::RefreshError;
use super::exchange::RateTable;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate decimal places (0 to 4).
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=4
}

/// Strategy to generate a completion order and success flag per refresh.
fn completion_schedule() -> impl Strategy<Value = (Vec<u64>, Vec<bool>)> {
    (2usize..8).prop_flat_map(|n| {
        let order = Just((1..=n as u64).collect::<Vec<_>>()).prop_shuffle();
        let outcomes = prop::collection::vec(any::<bool>(), n);
        (order, outcomes)
    })
}

fn code(s: &str) -> CurrencyCode {
    s.parse().unwrap()
}

/// Table whose INR rate identifies the refresh that produced it.
fn tagged_table(tag: u64) -> RateTable {
    RateTable::new(
        code("USD"),
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        BTreeMap::from([(code("INR"), Decimal::from(tag))]),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Banker's Rounding Correctness
    // =========================================================================

    /// Property 1.1: Conversion result has at most the requested decimal places.
    #[test]
    fn prop_convert_respects_decimal_places(
        amount in positive_amount(),
        rate in positive_rate(),
        dp in decimal_places(),
    ) {
        let result = convert_amount(amount, rate, dp).unwrap();
        prop_assert!(result.scale() <= dp, "{} has more than {} decimal places", result, dp);
    }

    /// Property 1.2: Rounding moves the value by at most half a unit.
    #[test]
    fn prop_rounding_error_bounded(
        amount in positive_amount(),
        rate in positive_rate(),
        dp in decimal_places(),
    ) {
        let exact = amount * rate;
        let rounded = convert_amount(amount, rate, dp).unwrap();
        let half_unit = Decimal::new(5, dp + 1);
        prop_assert!((exact - rounded).abs() <= half_unit);
    }

    /// Property 1.3: Rate 1 preserves the amount.
    #[test]
    fn prop_unit_rate_preserves_amount(amount in positive_amount()) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE, 2), Some(amount));
    }

    // =========================================================================
    // Property 2: Conversion Display Consistency
    // =========================================================================

    /// Property 2.1: Displayed result is the product rounded to 2 places.
    #[test]
    fn prop_display_matches_rounded_product(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let table = RateTable::new(
            code("USD"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            BTreeMap::from([(code("INR"), rate)]),
        )
        .unwrap();
        let request = ConversionRequest::new(amount, code("USD"), code("INR"));
        let result = convert(&request, Some(&table)).unwrap();

        prop_assert_eq!(Some(result.rounded), convert_amount(amount, rate, 2));
        prop_assert_eq!(
            result.to_string(),
            format!("{:.2} USD = {:.2} INR", amount, result.rounded)
        );
    }

    /// Property 2.2: Any currency missing from the table is reported as unknown.
    #[test]
    fn prop_missing_target_is_unknown(target in "[A-Z]{3}", amount in positive_amount()) {
        prop_assume!(target != "INR");
        let table = tagged_table(83);
        let request = ConversionRequest::new(amount, code("USD"), code(&target));
        prop_assert!(convert(&request, Some(&table)).is_err());
    }

    // =========================================================================
    // Property 3: Last-Issued Refresh Wins
    // =========================================================================

    /// Property 3.1: Whatever order completions arrive in, the cached table
    /// comes from the latest-issued refresh that succeeded.
    #[test]
    fn prop_latest_successful_refresh_wins(
        (order, outcomes) in completion_schedule(),
    ) {
        let cache = RateCache::new();
        let tickets: Vec<_> = (0..order.len())
            .map(|_| cache.begin_refresh(code("USD")))
            .collect();

        for sequence in &order {
            let ticket = &tickets[usize::try_from(*sequence).unwrap() - 1];
            let result = if outcomes[usize::try_from(*sequence).unwrap() - 1] {
                Ok(tagged_table(*sequence))
            } else {
                Err(RefreshError::network("unreachable"))
            };
            let _ = cache.complete(ticket, result);
        }

        let latest_success = (1..=order.len() as u64)
            .filter(|seq| outcomes[usize::try_from(*seq).unwrap() - 1])
            .max();

        match latest_success {
            Some(seq) => {
                let table = cache.snapshot().unwrap();
                prop_assert_eq!(table.rate(&code("INR")), Some(Decimal::from(seq)));
                prop_assert_eq!(cache.applied_sequence(), seq);
            }
            None => prop_assert!(cache.snapshot().is_none()),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_tagged_table_rate() {
        assert_eq!(
            tagged_table(7).rate(&code("INR")),
            Some(Decimal::from(7))
        );
    }
}
