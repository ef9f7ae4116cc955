//! Expression composition state machine.
//!
//! ```text
//! Composing --append(token)--> Composing
//! Composing --clear--------->  Composing (empty)
//! Composing --evaluate------>  Composing (result) | Error
//! Error     --append(token)--> Composing (token only)
//! Error     --clear--------->  Composing (empty)
//! ```

use tracing::debug;

use super::error::CalcError;
use super::expression::{evaluate, format_result};
use super::keypad::CalculatorMode;
use super::token::Function;

/// Text shown in place of a result after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorState {
    /// Building up an expression (possibly a previous result).
    Composing,
    /// Last evaluation failed; the display shows [`ERROR_DISPLAY`].
    Error,
}

/// Keypad calculator: owns the expression being composed.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    mode: CalculatorMode,
    expression: String,
    last_error: Option<CalcError>,
}

impl Calculator {
    /// Creates an empty calculator in the given mode.
    #[must_use]
    pub fn new(mode: CalculatorMode) -> Self {
        Self {
            mode,
            expression: String::new(),
            last_error: None,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> CalculatorMode {
        self.mode
    }

    /// Switch mode. The expression is always reset.
    pub fn set_mode(&mut self, mode: CalculatorMode) -> &str {
        self.mode = mode;
        self.clear()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CalculatorState {
        if self.last_error.is_some() {
            CalculatorState::Error
        } else {
            CalculatorState::Composing
        }
    }

    /// Why the last evaluation failed, while in the `Error` state.
    #[must_use]
    pub const fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// The text to render.
    #[must_use]
    pub fn display(&self) -> &str {
        match self.state() {
            CalculatorState::Composing => &self.expression,
            CalculatorState::Error => ERROR_DISPLAY,
        }
    }

    /// Append a token verbatim. From the `Error` state the token starts a new
    /// expression.
    pub fn append_token(&mut self, token: &str) -> &str {
        if self.last_error.take().is_some() {
            self.expression.clear();
        }
        self.expression.push_str(token);
        self.display()
    }

    /// Reset to an empty expression.
    pub fn clear(&mut self) -> &str {
        self.expression.clear();
        self.last_error = None;
        self.display()
    }

    /// Evaluate the expression. On success the formatted result becomes the
    /// new expression so it can be chained.
    pub fn evaluate(&mut self) -> &str {
        let source = if self.last_error.is_some() {
            ""
        } else {
            self.expression.as_str()
        };

        match evaluate(source) {
            Ok(value) => {
                self.expression = format_result(value);
            }
            Err(err) => {
                debug!(expression = %source, error = %err, "Evaluation failed");
                self.expression.clear();
                self.last_error = Some(err);
            }
        }
        self.display()
    }

    /// Dispatch a keypad label.
    ///
    /// `Clear`/`C` clear, `=` evaluates, a function label appends `name(`,
    /// and anything else is appended verbatim.
    pub fn press(&mut self, key: &str) -> &str {
        match key {
            "Clear" | "C" => self.clear(),
            "=" => self.evaluate(),
            _ => match Function::from_name(key) {
                Some(function) => {
                    let call = format!("{}(", function.name());
                    self.append_token(&call)
                }
                None => self.append_token(key),
            },
        }
    }
}
