//! Low-level HTTP client — `StockHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens at the Layer 3 boundary). Internal to the SDK — Layer 3 wraps this.

use crate::domain::stock::wire::{ForecastRequest, StockInfoResponse, StockPointResponse};
use crate::domain::stock::HistoricalQuery;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::Symbol;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing;

/// Low-level HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct StockHttp {
    base_url: String,
    client: Client,
    /// Policy for the read endpoints. Forecasts are never retried.
    read_retry: RetryPolicy,
}

impl StockHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            read_retry: RetryPolicy::None,
        })
    }

    pub fn with_read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Stocks ───────────────────────────────────────────────────────────

    pub async fn get_historical(
        &self,
        query: &HistoricalQuery,
    ) -> Result<Vec<StockPointResponse>, HttpError> {
        let url = format!("{}/api/historical?{}", self.base_url, query.to_query_string());
        self.get(&url, self.read_retry.clone()).await
    }

    pub async fn get_stock_info(&self, symbol: &Symbol) -> Result<StockInfoResponse, HttpError> {
        let url = format!(
            "{}/api/stock-info?symbol={}",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        );
        self.get(&url, self.read_retry.clone()).await
    }

    pub async fn post_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<Vec<StockPointResponse>, HttpError> {
        let url = format!("{}/api/forecast", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::Api { status, .. } | HttpError::Status { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::trace!(%method, url, "Sending request");
        let resp = req.send().await.map_err(map_transport)?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await.map_err(map_transport)?;
            return Ok(parsed);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(error_from_response(status.as_u16(), &body_text))
    }
}

fn map_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

/// Structured error body: `{"message": "..."}` (or `{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Classify a non-2xx response.
pub(crate) fn error_from_response(status: u16, body: &str) -> HttpError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => HttpError::Api { status, message },
        None => HttpError::Status {
            status,
            body: body.to_string(),
        },
    }
}
