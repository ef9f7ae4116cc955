//! Exchange rate provider backed by an `exchangerate-api`-style HTTP endpoint.
//!
//! `GET {api_url}{BASE}` must return a JSON document with at least `date`
//! and `rates`; see [`abacus_core::currency::RatesDocument`].

mod client;

pub use client::{ExchangeRateApiClient, decode_rates};
