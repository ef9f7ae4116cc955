//! Core calculation logic for Abacus.
//!
//! This crate contains pure calculation and caching logic with ZERO GUI or HTTP
//! dependencies. Rate fetching is abstracted behind [`currency::RateProvider`].
//!
//! # Modules
//!
//! - `calculator` - Expression evaluation and the keypad state machine
//! - `finance` - Simple/compound interest and loan EMI
//! - `currency` - Rate tables, conversion and refresh ordering

pub mod calculator;
pub mod currency;
pub mod finance;
