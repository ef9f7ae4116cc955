//! Free-text form fields for the financial calculators.
//!
//! Fields arrive as whatever the user typed; parsing and validation both map
//! to [`ValidationError`].

use super::error::ValidationError;
use super::interest::{CompoundInterest, SimpleInterest, compound_interest, simple_interest};
use super::loan::{LoanPayment, loan_emi};

/// Text shown when a financial form cannot be calculated.
pub const FINANCE_ERROR_DISPLAY: &str = "Error: Enter valid numbers";

/// Parse a decimal field (`"1500"`, `" 4.25 "`, `"1e3"`).
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: text.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(value)
}

/// Parse a whole-number field such as a term in years.
pub fn parse_count(field: &'static str, text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: text.to_string(),
        })
}

/// Simple-interest form.
#[derive(Debug, Clone, Default)]
pub struct SimpleInterestForm {
    /// Principal.
    pub principal: String,
    /// Rate % per year.
    pub rate_percent: String,
    /// Time in years.
    pub years: String,
}

impl SimpleInterestForm {
    /// Parse the fields and calculate.
    pub fn calculate(&self) -> Result<SimpleInterest, ValidationError> {
        simple_interest(
            parse_number("Principal", &self.principal)?,
            parse_number("Rate", &self.rate_percent)?,
            parse_number("Time", &self.years)?,
        )
    }
}

/// Compound-interest form.
#[derive(Debug, Clone, Default)]
pub struct CompoundInterestForm {
    /// Principal.
    pub principal: String,
    /// Rate % per year.
    pub rate_percent: String,
    /// Time in years.
    pub years: String,
    /// Compounding periods per year.
    pub compounds_per_year: String,
}

impl CompoundInterestForm {
    /// Parse the fields and calculate.
    pub fn calculate(&self) -> Result<CompoundInterest, ValidationError> {
        compound_interest(
            parse_number("Principal", &self.principal)?,
            parse_number("Rate", &self.rate_percent)?,
            parse_number("Time", &self.years)?,
            parse_count("Compounds per year", &self.compounds_per_year)?,
        )
    }
}

/// Loan (EMI) form.
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    /// Loan amount.
    pub principal: String,
    /// Rate % per year.
    pub annual_rate_percent: String,
    /// Term in whole years.
    pub term_years: String,
}

impl LoanForm {
    /// Parse the fields and calculate.
    pub fn calculate(&self) -> Result<LoanPayment, ValidationError> {
        loan_emi(
            parse_number("Loan Amount", &self.principal)?,
            parse_number("Rate", &self.annual_rate_percent)?,
            parse_count("Term", &self.term_years)?,
        )
    }
}
