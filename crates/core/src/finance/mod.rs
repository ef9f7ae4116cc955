//! Interest and loan formulas.
//!
//! Every formula validates its inputs and returns a [`ValidationError`]
//! instead of panicking or producing `NaN`. Results keep full `f64` precision;
//! rounding to two decimals happens only in their `Display` output.

pub mod error;
pub mod form;
pub mod interest;
pub mod loan;

#[cfg(test)]
mod finance_props;

pub use error::ValidationError;
pub use form::{CompoundInterestForm, FINANCE_ERROR_DISPLAY, LoanForm, SimpleInterestForm};
pub use interest::{CompoundInterest, SimpleInterest, compound_interest, simple_interest};
pub use loan::{LoanPayment, loan_emi};

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

fn ensure_positive(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

fn ensure_result(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteResult)
    }
}
