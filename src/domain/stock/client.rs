//! Stocks sub-client — historical series, metadata (cached), forecasts.

use super::convert::points_from_wire;
use super::wire::ForecastRequest;
use super::{HistoricalQuery, StockInfo, StockPoint};
use crate::client::StockdashClient;
use crate::error::SdkError;
use crate::shared::Symbol;
use std::time::Instant;

/// Sub-client for stock data operations.
pub struct Stocks<'a> {
    pub(crate) client: &'a StockdashClient,
}

impl<'a> Stocks<'a> {
    /// Historical series with the requested indicators, ascending by date.
    pub async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<StockPoint>, SdkError> {
        let rows = self.client.http.get_historical(query).await?;
        points_from_wire(rows).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Company metadata. Uses TTL cache.
    pub async fn info(&self, symbol: &Symbol) -> Result<StockInfo, SdkError> {
        {
            let cache = self.client.info_cache.read().await;
            if let Some((info, fetched_at)) = cache.get(symbol) {
                if fetched_at.elapsed() < self.client.info_cache_ttl {
                    return Ok(info.clone());
                }
            }
        }

        let info = StockInfo::from(self.client.http.get_stock_info(symbol).await?);
        if !self.client.info_cache_ttl.is_zero() {
            self.client
                .info_cache
                .write()
                .await
                .insert(symbol.clone(), (info.clone(), Instant::now()));
        }
        Ok(info)
    }

    /// Forecast series (forecast dates only). Never cached, never retried.
    pub async fn forecast(&self, request: &ForecastRequest) -> Result<Vec<StockPoint>, SdkError> {
        if request.forecast_period == 0 {
            return Err(SdkError::Validation(
                "forecast_period must be positive".to_string(),
            ));
        }
        let rows = self.client.http.post_forecast(request).await?;
        points_from_wire(rows).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Invalidate cached metadata for one symbol.
    pub async fn invalidate(&self, symbol: &Symbol) {
        self.client.info_cache.write().await.remove(symbol);
    }
}
