//! Source and target currency selection.

use abacus_shared::CurrencyCode;

use super::cache::RefreshTrigger;
use super::conversion::ConversionRequest;
use super::error::ConversionError;

/// Currencies picked in the converter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySelection {
    from: CurrencyCode,
    to: CurrencyCode,
}

impl CurrencySelection {
    /// Creates a selection.
    #[must_use]
    pub const fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    /// Source currency; also the base rates are fetched for.
    #[must_use]
    pub const fn from(&self) -> &CurrencyCode {
        &self.from
    }

    /// Target currency.
    #[must_use]
    pub const fn to(&self) -> &CurrencyCode {
        &self.to
    }

    /// Select a source currency. Returns a trigger if rates need refetching.
    pub fn select_from(&mut self, code: CurrencyCode) -> Option<RefreshTrigger> {
        if code == self.from {
            return None;
        }
        self.from = code;
        Some(RefreshTrigger::BaseChanged)
    }

    /// Select a target currency. Never triggers a refresh.
    pub fn select_to(&mut self, code: CurrencyCode) {
        self.to = code;
    }

    /// Build a conversion request for the typed amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the text is not a number.
    pub fn request(&self, amount_text: &str) -> Result<ConversionRequest, ConversionError> {
        ConversionRequest::parse(amount_text, self.from.clone(), self.to.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_select_from_triggers_only_on_change() {
        let mut selection = CurrencySelection::new(code("USD"), code("INR"));
        assert_eq!(selection.select_from(code("USD")), None);
        assert_eq!(
            selection.select_from(code("EUR")),
            Some(RefreshTrigger::BaseChanged)
        );
        assert_eq!(selection.from(), &code("EUR"));
    }

    #[test]
    fn test_select_to() {
        let mut selection = CurrencySelection::new(code("USD"), code("INR"));
        selection.select_to(code("JPY"));
        assert_eq!(selection.to(), &code("JPY"));
        assert_eq!(selection.from(), &code("USD"));
    }

    #[test]
    fn test_request() {
        let selection = CurrencySelection::new(code("USD"), code("INR"));
        let request = selection.request("250.5").unwrap();
        assert_eq!(request.amount, dec!(250.5));
        assert_eq!(request.from, code("USD"));
        assert_eq!(request.to, code("INR"));
        assert!(selection.request("lots").is_err());
    }
}
