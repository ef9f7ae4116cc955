//! Simple and compound interest.

use std::fmt;

use serde::Serialize;

use super::error::ValidationError;
use super::{ensure_finite, ensure_non_negative, ensure_positive, ensure_result};

/// Outcome of a simple-interest calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimpleInterest {
    /// Interest earned: `P * r * T`.
    pub interest: f64,
    /// Principal plus interest.
    pub total: f64,
}

/// Outcome of a compound-interest calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompoundInterest {
    /// Final amount: `P * (1 + r/n)^(n*T)`.
    pub amount: f64,
    /// `amount - P`.
    pub interest: f64,
}

/// Simple interest on `principal` at `rate_percent` per year for `years`.
pub fn simple_interest(
    principal: f64,
    rate_percent: f64,
    years: f64,
) -> Result<SimpleInterest, ValidationError> {
    ensure_non_negative("Principal", principal)?;
    ensure_finite("Rate", rate_percent)?;
    ensure_finite("Time", years)?;

    let interest = principal * (rate_percent / 100.0) * years;
    let total = principal + interest;

    ensure_result(interest)?;
    ensure_result(total)?;
    Ok(SimpleInterest { interest, total })
}

/// Interest compounded `compounds_per_year` times a year.
pub fn compound_interest(
    principal: f64,
    rate_percent: f64,
    years: f64,
    compounds_per_year: u32,
) -> Result<CompoundInterest, ValidationError> {
    ensure_non_negative("Principal", principal)?;
    ensure_finite("Rate", rate_percent)?;
    ensure_finite("Time", years)?;
    ensure_positive("Compounds per year", compounds_per_year)?;

    let n = f64::from(compounds_per_year);
    let amount = principal * (1.0 + (rate_percent / 100.0) / n).powf(n * years);
    let interest = amount - principal;

    ensure_result(amount)?;
    ensure_result(interest)?;
    Ok(CompoundInterest { amount, interest })
}

impl fmt::Display for SimpleInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simple Interest: ${:.2}\nTotal Amount: ${:.2}",
            self.interest, self.total
        )
    }
}

impl fmt::Display for CompoundInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compound Interest: ${:.2}\nTotal Amount: ${:.2}",
            self.interest, self.amount
        )
    }
}
