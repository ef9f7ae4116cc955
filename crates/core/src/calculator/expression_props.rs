//! Property-based tests for the expression engine.

use proptest::prelude::*;

use super::error::CalcError;
use super::expression::{evaluate, format_result};
use super::session::{Calculator, ERROR_DISPLAY};

/// Small non-negative decimals with up to two fractional digits.
fn operand() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|v| f64::from(v) / 100.0)
}

/// Strictly positive operands, safe as divisors and log arguments.
fn positive_operand() -> impl Strategy<Value = f64> {
    (1u32..100_000).prop_map(|v| f64::from(v) / 100.0)
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Binary operators follow standard precedence.
    #[test]
    fn prop_precedence(a in operand(), b in operand(), c in positive_operand()) {
        let text = format!("{}+{}*{}/{}", format_result(a), format_result(b), format_result(c), format_result(c));
        let value = evaluate(&text).unwrap();
        prop_assert!(close(value, a + b * c / c), "{} = {}", text, value);
    }

    /// Parentheses override precedence.
    #[test]
    fn prop_parentheses(a in operand(), b in operand(), c in operand()) {
        let text = format!("({}-{})*{}", format_result(a), format_result(b), format_result(c));
        let value = evaluate(&text).unwrap();
        prop_assert!(close(value, (a - b) * c));
    }

    /// Functions match their real-valued implementations.
    #[test]
    fn prop_functions(x in positive_operand()) {
        let arg = format_result(x);
        let cases = [
            ("sqrt", x.sqrt()),
            ("ln", x.ln()),
            ("log", x.log10()),
            ("sin", x.sin()),
            ("cos", x.cos()),
        ];
        for (name, expected) in cases {
            let text = format!("{name}({arg})");
            let value = evaluate(&text).unwrap();
            let matches = close(value, expected);
            prop_assert!(matches, "{} = {}, expected {}", text, value, expected);
        }
    }

    /// Dividing anything by zero is a domain error.
    #[test]
    fn prop_division_by_zero(a in operand()) {
        let result = evaluate(&format!("{}/0", format_result(a)));
        prop_assert!(matches!(result, Err(CalcError::Domain(_))));
    }

    /// A displayed result re-evaluates to itself.
    #[test]
    fn prop_result_round_trips(a in operand(), b in positive_operand()) {
        let value = evaluate(&format!("{}/{}", format_result(a), format_result(b))).unwrap();
        let again = evaluate(&format_result(value)).unwrap();
        prop_assert_eq!(value.to_bits(), again.to_bits());
    }

    /// Arbitrary text never panics; it either evaluates or yields an error.
    #[test]
    fn prop_arbitrary_input_is_total(input in ".{0,40}") {
        let mut calc = Calculator::default();
        calc.append_token(&input);
        let display = calc.evaluate().to_string();
        prop_assert!(display == ERROR_DISPLAY || display.parse::<f64>().is_ok());
    }

    /// Any keystroke after an error starts a fresh expression.
    #[test]
    fn prop_error_discarded_by_next_key(key in "[0-9]") {
        let mut calc = Calculator::default();
        calc.append_token("1/0");
        calc.evaluate();
        prop_assert_eq!(calc.append_token(&key), key.as_str());
    }
}
