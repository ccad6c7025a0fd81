//! # Stockdash SDK
//!
//! A Rust client for the stock dashboard API: historical prices with
//! technical indicators, company metadata, and price forecasts.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Types, domain models, chart shaping (always available)
//! 2. **HTTP API** — `StockHttp` with one method per endpoint and an opt-in retry policy
//! 3. **High-Level Client** — `StockdashClient` with a `stocks()` sub-client and an info cache
//! 4. **Dashboard** — view state, debounced refetch, forecast trigger
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockdash_sdk::prelude::*;
//!
//! let client = StockdashClient::builder()
//!     .base_url("http://localhost:3000")
//!     .build()?;
//!
//! let mut query = HistoricalQuery::new("AAPL");
//! query.indicators = vec![Indicator::Sma, Indicator::Rsi];
//! let points = client.stocks().historical(&query).await?;
//! let info = client.stocks().info(&Symbol::new("AAPL")).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and helpers used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `StockdashClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Dashboard ───────────────────────────────────────────────────────

/// Debounced dashboard session over a `StockApi`.
#[cfg(feature = "dashboard")]
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Indicator, Interval, Symbol};

    // Domain types — stock
    pub use crate::domain::stock::wire::ForecastRequest;
    pub use crate::domain::stock::{HistoricalQuery, IndicatorLine, StockInfo, StockPoint};

    // Domain types — view, chart
    pub use crate::domain::chart::{Axis, ChartData, ChartPoint, ChartSeries, SeriesKey};
    pub use crate::domain::view::{DashboardState, ViewField, ViewState, ViewStateError};

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{StockApi, StockdashClient, StockdashClientBuilder, StocksClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // Dashboard
    #[cfg(feature = "dashboard")]
    pub use crate::dashboard::{Dashboard, DashboardConfig, DashboardEvent};
}
