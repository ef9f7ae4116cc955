//! Property-based tests for the financial formulas.

use proptest::prelude::*;

use super::interest::{compound_interest, simple_interest};
use super::loan::loan_emi;

/// Principal from 0.00 to 1,000,000.00.
fn principal() -> impl Strategy<Value = f64> {
    (0u32..100_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Annual rate from 0.00% to 30.00%.
fn rate_percent() -> impl Strategy<Value = f64> {
    (0u32..3_000).prop_map(|bps| f64::from(bps) / 100.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Total is always principal plus interest.
    #[test]
    fn prop_simple_total(p in principal(), r in rate_percent(), t in 0u32..50) {
        let result = simple_interest(p, r, f64::from(t)).unwrap();
        prop_assert!((result.total - (p + result.interest)).abs() < 1e-6);
    }

    /// Compounding never yields less than simple interest for non-negative rates.
    #[test]
    fn prop_compound_at_least_simple(p in principal(), r in rate_percent(), t in 1u32..30, n in 1u32..=365) {
        let compound = compound_interest(p, r, f64::from(t), n).unwrap();
        let simple = simple_interest(p, r, f64::from(t)).unwrap();
        prop_assert!(compound.amount + 1e-6 >= simple.total);
    }

    /// With a zero rate the EMI is exactly principal over months.
    #[test]
    fn prop_zero_rate_emi(p in principal(), years in 1u32..40) {
        let payment = loan_emi(p, 0.0, years).unwrap();
        prop_assert_eq!(payment.emi, p / f64::from(years * 12));
    }

    /// Installments repay at least the principal.
    #[test]
    fn prop_emi_covers_principal(p in principal(), r in rate_percent(), years in 1u32..40) {
        let payment = loan_emi(p, r, years).unwrap();
        prop_assert!(payment.total_paid() + 1e-6 >= p);
    }
}
