//! Wire types for stock responses and requests (REST).

use crate::shared::serde_util::{lenient_f64, DateValue};
use crate::shared::{Indicator, Interval, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of `/api/historical` or `/api/forecast`.
///
/// Forecast rows produced straight from a model frame use `ds`/`yhat`
/// instead of `date`/`close`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPointResponse {
    #[serde(alias = "ds")]
    pub date: DateValue,
    #[serde(alias = "yhat", deserialize_with = "lenient_f64::deserialize")]
    pub close: f64,
    #[serde(rename = "SMA", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub sma: Option<f64>,
    #[serde(rename = "EMA", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub ema: Option<f64>,
    #[serde(rename = "RSI", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub macd: Option<f64>,
    #[serde(rename = "BB_UPPER", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_MIDDLE", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub bb_middle: Option<f64>,
    #[serde(rename = "BB_LOWER", default, deserialize_with = "lenient_f64::option::deserialize")]
    pub bb_lower: Option<f64>,
}

/// `/api/stock-info` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockInfoResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Raw metric values; non-numeric entries are dropped on conversion.
    #[serde(default, alias = "financials")]
    pub metrics: HashMap<String, serde_json::Value>,
}

/// `POST /api/forecast` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub symbol: Symbol,
    pub interval: Interval,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub forecast_period: u32,
    pub indicators: Vec<Indicator>,
}
