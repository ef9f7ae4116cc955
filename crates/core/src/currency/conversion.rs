//! Currency conversion logic.
//!
//! Rounding for display:
//! - Converted amounts are rounded to 2 decimal places
//! - Use banker's rounding (round half to even)
//! - The unrounded product is kept alongside the rounded one

use std::fmt;

use abacus_shared::CurrencyCode;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Serialize;
use tracing::warn;

use super::error::ConversionError;
use super::exchange::RateTable;

/// Decimal places shown for both sides of a conversion.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Returns `None` if the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|converted| round(converted, decimal_places))
}

fn round(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Parse user-entered amount text, plain (`12.5`) or scientific (`1e3`).
///
/// # Errors
///
/// Returns `InvalidAmount` for anything else, including `nan` and `inf`.
pub fn parse_amount(text: &str) -> Result<Decimal, ConversionError> {
    let trimmed = text.trim();
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConversionError::InvalidAmount(text.to_string()))
}

/// An amount to convert between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    /// Amount in `from` currency.
    pub amount: Decimal,
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
}

impl ConversionRequest {
    /// Creates a request from an already parsed amount.
    #[must_use]
    pub const fn new(amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { amount, from, to }
    }

    /// Creates a request from amount text as typed by the user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the text is not a number.
    pub fn parse(
        amount_text: &str,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Self, ConversionError> {
        Ok(Self::new(parse_amount(amount_text)?, from, to))
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedAmount {
    /// Amount in source currency, as requested.
    pub amount: Decimal,
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
    /// Rate applied, `1 base = rate to`.
    pub rate: Decimal,
    /// Converted amount before rounding.
    pub converted: Decimal,
    /// Converted amount rounded for display.
    pub rounded: Decimal,
}

impl fmt::Display for ConvertedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            round(self.amount, DISPLAY_DECIMAL_PLACES),
            self.from,
            self.rounded,
            self.to
        )
    }
}

/// Convert `request` with the cached rate table.
///
/// The table is quoted against its own base currency, so the result is only
/// meaningful when `request.from` equals that base. A mismatch is logged and
/// the base-relative rate is still applied.
///
/// # Errors
///
/// - `NoRatesAvailable` if no table has been fetched yet
/// - `UnknownCurrency` if `request.to` is not quoted
/// - `InvalidAmount` if the product overflows
pub fn convert(
    request: &ConversionRequest,
    table: Option<&RateTable>,
) -> Result<ConvertedAmount, ConversionError> {
    let table = table.ok_or(ConversionError::NoRatesAvailable)?;

    if &request.from != table.base() {
        warn!(
            from = %request.from,
            base = %table.base(),
            "Converting from a currency other than the rate table base"
        );
    }

    let rate = table
        .rate(&request.to)
        .ok_or_else(|| ConversionError::UnknownCurrency(request.to.clone()))?;

    let rounded = convert_amount(request.amount, rate, DISPLAY_DECIMAL_PLACES)
        .ok_or_else(|| ConversionError::InvalidAmount(request.amount.to_string()))?;

    // The product fits: convert_amount already checked it
    Ok(ConvertedAmount {
        amount: request.amount,
        from: request.from.clone(),
        to: request.to.clone(),
        rate,
        converted: request.amount * rate,
        rounded,
    })
}
