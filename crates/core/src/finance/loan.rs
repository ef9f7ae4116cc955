//! Loan amortization (equated monthly installment).

use std::fmt;

use serde::Serialize;

use super::error::ValidationError;
use super::{ensure_finite, ensure_non_negative, ensure_positive, ensure_result};

/// Fixed monthly repayment for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanPayment {
    /// Monthly installment.
    pub emi: f64,
    /// Number of monthly installments.
    pub months: u32,
}

impl LoanPayment {
    /// Sum of all installments.
    #[must_use]
    pub fn total_paid(&self) -> f64 {
        self.emi * f64::from(self.months)
    }
}

/// EMI for `principal` at `annual_rate_percent` over `term_years`.
///
/// With `r` the monthly rate and `n` the number of months:
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when `r` is zero.
pub fn loan_emi(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<LoanPayment, ValidationError> {
    ensure_non_negative("Loan Amount", principal)?;
    ensure_finite("Rate", annual_rate_percent)?;
    ensure_positive("Term", term_years)?;

    let months = term_years
        .checked_mul(12)
        .ok_or(ValidationError::NonFiniteResult)?;
    let n = f64::from(months);
    let r = (annual_rate_percent / 100.0) / 12.0;

    let emi = if r == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + r).powf(n);
        principal * r * growth / (growth - 1.0)
    };

    ensure_result(emi)?;
    Ok(LoanPayment { emi, months })
}

impl fmt::Display for LoanPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Monthly EMI: ${:.2}", self.emi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_one_year_twelve_percent() {
        let payment = loan_emi(100_000.0, 12.0, 1).unwrap();
        assert_eq!(payment.months, 12);
        assert!((payment.emi - 8884.878_867_9).abs() < 1e-4);
        assert_eq!(payment.to_string(), "Monthly EMI: $8884.88");
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let payment = loan_emi(120_000.0, 0.0, 5).unwrap();
        assert_eq!(payment.emi, 120_000.0 / 60.0);
        assert_eq!(payment.emi, 2000.0);
    }

    #[test]
    fn test_total_paid_exceeds_principal_with_interest() {
        let payment = loan_emi(50_000.0, 8.5, 10).unwrap();
        assert!(payment.total_paid() > 50_000.0);
    }

    #[test]
    fn test_zero_term_rejected() {
        assert_eq!(
            loan_emi(100_000.0, 12.0, 0),
            Err(ValidationError::NotPositive { field: "Term" })
        );
    }

    #[test]
    fn test_zero_principal_gives_zero_emi() {
        let payment = loan_emi(0.0, 7.0, 3).unwrap();
        assert_eq!(payment.emi, 0.0);
    }
}
