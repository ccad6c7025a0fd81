//! HTTP client layer — `StockHttp` with an opt-in retry policy.

pub mod client;
pub mod retry;

#[cfg(test)]
pub(crate) mod stub;

pub use client::StockHttp;
pub use retry::{RetryConfig, RetryPolicy};
