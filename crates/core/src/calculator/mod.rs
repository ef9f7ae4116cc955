//! Keypad calculator and restricted arithmetic expression engine.
//!
//! This module implements:
//! - Tokenizer over a closed alphabet (numbers, `+ - * / ^`, parentheses, `π`,
//!   `sin cos tan log ln sqrt`)
//! - Recursive-descent parser and checked evaluator
//! - The keypad state machine (`Composing` / `Error`)
//! - Calculator modes and their keypads

pub mod error;
pub mod expression;
pub mod keypad;
pub mod session;
pub mod token;

#[cfg(test)]
mod expression_props;

pub use error::{CalcError, DomainError};
pub use expression::{Expr, evaluate, format_result, parse};
pub use keypad::CalculatorMode;
pub use session::{Calculator, CalculatorState, ERROR_DISPLAY};
pub use token::Function;
