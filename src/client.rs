//! High-level client — `StockdashClient` with nested sub-client accessors.
//!
//! The stock sub-client lives in `domain/stock/client.rs`. This module keeps
//! the builder, shared cache state, and the [`StockApi`] seam the dashboard
//! orchestrator is written against.

use crate::domain::stock::client::Stocks;
use crate::domain::stock::wire::ForecastRequest;
use crate::domain::stock::{HistoricalQuery, StockInfo, StockPoint};
use crate::error::SdkError;
use crate::http::{RetryPolicy, StockHttp};
use crate::shared::Symbol;

use async_lock::RwLock;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::stock::client::Stocks as StocksClient;

/// The three backend calls the dashboard depends on.
///
/// `StockdashClient` is the production implementation; tests and offline
/// front-ends can substitute their own.
#[async_trait]
pub trait StockApi: Send + Sync {
    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<StockPoint>, SdkError>;

    async fn stock_info(&self, symbol: &Symbol) -> Result<StockInfo, SdkError>;

    async fn forecast(&self, request: &ForecastRequest) -> Result<Vec<StockPoint>, SdkError>;
}

/// The primary entry point for the dashboard API.
#[derive(Clone)]
pub struct StockdashClient {
    pub(crate) http: StockHttp,
    /// Metadata cache: symbol → (StockInfo, fetched_at)
    pub(crate) info_cache: Arc<RwLock<HashMap<Symbol, (StockInfo, Instant)>>>,
    /// Cache TTL for metadata. Zero disables caching.
    pub(crate) info_cache_ttl: Duration,
}

impl StockdashClient {
    pub fn builder() -> StockdashClientBuilder {
        StockdashClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn stocks(&self) -> Stocks<'_> {
        Stocks { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.info_cache.write().await.clear();
    }
}

#[async_trait]
impl StockApi for StockdashClient {
    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<StockPoint>, SdkError> {
        self.stocks().historical(query).await
    }

    async fn stock_info(&self, symbol: &Symbol) -> Result<StockInfo, SdkError> {
        self.stocks().info(symbol).await
    }

    async fn forecast(&self, request: &ForecastRequest) -> Result<Vec<StockPoint>, SdkError> {
        self.stocks().forecast(request).await
    }
}

#[async_trait]
impl<T: StockApi + ?Sized> StockApi for Arc<T> {
    async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<StockPoint>, SdkError> {
        (**self).historical(query).await
    }

    async fn stock_info(&self, symbol: &Symbol) -> Result<StockInfo, SdkError> {
        (**self).stock_info(symbol).await
    }

    async fn forecast(&self, request: &ForecastRequest) -> Result<Vec<StockPoint>, SdkError> {
        (**self).forecast(request).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct StockdashClientBuilder {
    base_url: String,
    timeout: Duration,
    read_retry: RetryPolicy,
    info_cache_ttl: Duration,
}

impl Default for StockdashClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            read_retry: RetryPolicy::None,
            info_cache_ttl: Duration::from_secs(60),
        }
    }
}

impl StockdashClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout applied to every endpoint.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry policy for the read endpoints. Forecast requests are never retried.
    pub fn read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn info_cache_ttl(mut self, ttl: Duration) -> Self {
        self.info_cache_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<StockdashClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base_url must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SdkError::Validation("timeout must be non-zero".to_string()));
        }

        Ok(StockdashClient {
            http: StockHttp::new(&self.base_url, self.timeout)?.with_read_retry(self.read_retry),
            info_cache: Arc::new(RwLock::new(HashMap::new())),
            info_cache_ttl: self.info_cache_ttl,
        })
    }
}
