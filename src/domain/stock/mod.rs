//! Stock domain — price points, indicator lines, company metadata.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{fmt as numfmt, Indicator, Interval, Symbol};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ─── StockPoint ──────────────────────────────────────────────────────────────

/// One bar of a historical or forecast series.
///
/// Indicator fields are only populated when the indicator was requested.
/// Forecast points never carry indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPoint {
    pub date: NaiveDateTime,
    pub close: f64,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl StockPoint {
    /// A bare price point with no indicator values.
    pub fn new(date: NaiveDateTime, close: f64) -> Self {
        Self {
            date,
            close,
            sma: None,
            ema: None,
            rsi: None,
            macd: None,
            bb_upper: None,
            bb_middle: None,
            bb_lower: None,
        }
    }

    pub fn value(&self, line: IndicatorLine) -> Option<f64> {
        match line {
            IndicatorLine::Sma => self.sma,
            IndicatorLine::Ema => self.ema,
            IndicatorLine::Rsi => self.rsi,
            IndicatorLine::Macd => self.macd,
            IndicatorLine::BbUpper => self.bb_upper,
            IndicatorLine::BbMiddle => self.bb_middle,
            IndicatorLine::BbLower => self.bb_lower,
        }
    }
}

// ─── IndicatorLine ───────────────────────────────────────────────────────────

/// A single plotted line. Bollinger Bands expand to three lines, every other
/// indicator to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorLine {
    Sma,
    Ema,
    Rsi,
    Macd,
    BbUpper,
    BbMiddle,
    BbLower,
}

impl IndicatorLine {
    pub fn for_indicator(indicator: Indicator) -> &'static [IndicatorLine] {
        match indicator {
            Indicator::Sma => &[IndicatorLine::Sma],
            Indicator::Ema => &[IndicatorLine::Ema],
            Indicator::Rsi => &[IndicatorLine::Rsi],
            Indicator::Macd => &[IndicatorLine::Macd],
            Indicator::Bbands => &[
                IndicatorLine::BbUpper,
                IndicatorLine::BbMiddle,
                IndicatorLine::BbLower,
            ],
        }
    }
}

// ─── StockInfo ───────────────────────────────────────────────────────────────

/// Company metadata shown next to the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub name: String,
    pub sector: String,
    pub website: String,
    /// Financial metrics (market cap, P/E, ...) keyed by backend name.
    pub metrics: BTreeMap<String, f64>,
}

impl StockInfo {
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    /// Metrics rendered for display, sorted by key. Large values are abbreviated.
    pub fn formatted_metrics(&self) -> Vec<(String, String)> {
        self.metrics
            .iter()
            .map(|(key, value)| {
                let shown = if value.abs() >= 1e6 {
                    numfmt::compact(*value)
                } else {
                    numfmt::display(*value)
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Parameters of a historical-series fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalQuery {
    pub symbol: Symbol,
    pub interval: Interval,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub indicators: Vec<Indicator>,
}

impl HistoricalQuery {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: Interval::default(),
            start_date: None,
            end_date: None,
            indicators: Vec::new(),
        }
    }

    /// Encoded query string: `symbol=..&interval=..[&start_date=..][&end_date=..]&indicators[]=..`
    pub fn to_query_string(&self) -> String {
        let mut params = vec![
            format!("symbol={}", urlencoding::encode(self.symbol.as_str())),
            format!("interval={}", self.interval.as_str()),
        ];
        if let Some(start) = self.start_date {
            params.push(format!("start_date={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = self.end_date {
            params.push(format!("end_date={}", end.format("%Y-%m-%d")));
        }
        for indicator in &self.indicators {
            params.push(format!("indicators[]={}", indicator.as_str()));
        }
        params.join("&")
    }
}

// ─── PointError ──────────────────────────────────────────────────────────────

/// A wire point that cannot become a [`StockPoint`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointError {
    InvalidDate(String),
    NonFiniteClose(String),
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointError::InvalidDate(raw) => write!(f, "Invalid point date: {}", raw),
            PointError::NonFiniteClose(date) => write!(f, "Non-finite close at {}", date),
        }
    }
}

impl std::error::Error for PointError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_string_minimal() {
        let q = HistoricalQuery::new("aapl");
        assert_eq!(q.to_query_string(), "symbol=AAPL&interval=1d");
    }

    #[test]
    fn test_query_string_full() {
        let q = HistoricalQuery {
            symbol: Symbol::from("MSFT"),
            interval: Interval::Hour1,
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 6, 30)),
            indicators: vec![Indicator::Sma, Indicator::Rsi],
        };
        assert_eq!(
            q.to_query_string(),
            "symbol=MSFT&interval=1h&start_date=2024-01-01&end_date=2024-06-30\
             &indicators[]=sma&indicators[]=rsi"
        );
    }

    #[test]
    fn test_query_string_encodes_symbol() {
        let q = HistoricalQuery::new("BRK B");
        assert!(q.to_query_string().starts_with("symbol=BRK%20B&"));
    }

    #[test]
    fn test_bbands_expand_to_three_lines() {
        let lines = IndicatorLine::for_indicator(Indicator::Bbands);
        assert_eq!(lines.len(), 3);
        assert_eq!(IndicatorLine::for_indicator(Indicator::Rsi), &[IndicatorLine::Rsi]);
    }

    #[test]
    fn test_point_value_lookup() {
        let mut p = StockPoint::new(date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(), 100.0);
        p.sma = Some(98.5);
        p.bb_lower = Some(90.0);
        assert_eq!(p.value(IndicatorLine::Sma), Some(98.5));
        assert_eq!(p.value(IndicatorLine::BbLower), Some(90.0));
        assert_eq!(p.value(IndicatorLine::Rsi), None);
    }

    #[test]
    fn test_formatted_metrics() {
        let mut info = StockInfo::default();
        info.metrics.insert("marketCap".into(), 2_500_000_000_000.0);
        info.metrics.insert("trailingPE".into(), 29.871);
        let shown = info.formatted_metrics();
        assert_eq!(
            shown,
            vec![
                ("marketCap".to_string(), "2.5T".to_string()),
                ("trailingPE".to_string(), "29.87".to_string()),
            ]
        );
        assert_eq!(info.metric("trailingPE"), Some(29.871));
    }
}
