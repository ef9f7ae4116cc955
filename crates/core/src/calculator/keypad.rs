//! Calculator modes and their keypads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Calculator mode selected in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalculatorMode {
    /// Digits and the four operators.
    #[default]
    Basic,
    /// Adds functions, powers, parentheses and π.
    Scientific,
    /// Interest and loan forms instead of a keypad.
    Financial,
}

const BASIC_KEYPAD: &[&[&str]] = &[
    &["7", "8", "9", "/"],
    &["4", "5", "6", "*"],
    &["1", "2", "3", "-"],
    &["0", ".", "=", "+"],
    &["Clear"],
];

const SCIENTIFIC_KEYPAD: &[&[&str]] = &[
    &["sin", "cos", "tan", "^", "sqrt"],
    &["log", "ln", "(", ")", "π"],
    &["7", "8", "9", "/", "C"],
    &["4", "5", "6", "*"],
    &["1", "2", "3", "-"],
    &["0", ".", "=", "+"],
];

impl CalculatorMode {
    /// All modes, in menu order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Scientific, Self::Financial];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Scientific => "Scientific",
            Self::Financial => "Financial",
        }
    }

    /// Keypad rows for this mode; empty for `Financial`.
    #[must_use]
    pub const fn keypad(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Basic => BASIC_KEYPAD,
            Self::Scientific => SCIENTIFIC_KEYPAD,
            Self::Financial => &[],
        }
    }

    /// Returns true if `key` is on this mode's keypad.
    #[must_use]
    pub fn has_key(self, key: &str) -> bool {
        self.keypad().iter().any(|row| row.contains(&key))
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CalculatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown calculator mode: {s}"))
    }
}
