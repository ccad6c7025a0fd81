//! Chart domain — reshapes fetched series into what a line chart consumes.
//!
//! The layout mirrors the dashboard: a primary price chart carrying the
//! historical close, the forecast and the overlay indicators (SMA, EMA,
//! Bollinger Bands), and a secondary chart for the oscillators (RSI, MACD),
//! each on its own axis.

use crate::domain::stock::{IndicatorLine, StockPoint};
use crate::shared::Indicator;
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

// ─── Axis ────────────────────────────────────────────────────────────────────

/// Y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Price,
    Rsi,
    Macd,
}

impl Axis {
    pub fn title(&self) -> &'static str {
        match self {
            Axis::Price => "Stock Price and Moving Averages",
            Axis::Rsi => "Relative Strength Index (RSI)",
            Axis::Macd => "MACD",
        }
    }
}

// ─── SeriesKey ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKey {
    Price,
    Forecast,
    Indicator(IndicatorLine),
}

impl SeriesKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKey::Price => "price",
            SeriesKey::Forecast => "forecast",
            SeriesKey::Indicator(line) => match line {
                IndicatorLine::Sma => "sma",
                IndicatorLine::Ema => "ema",
                IndicatorLine::Rsi => "rsi",
                IndicatorLine::Macd => "macd",
                IndicatorLine::BbUpper => "bb_upper",
                IndicatorLine::BbMiddle => "bb_middle",
                IndicatorLine::BbLower => "bb_lower",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeriesKey::Price => "Stock Price",
            SeriesKey::Forecast => "Forecasted Price",
            SeriesKey::Indicator(line) => match line {
                IndicatorLine::Sma => "Simple Moving Average (SMA)",
                IndicatorLine::Ema => "Exponential Moving Average (EMA)",
                IndicatorLine::Rsi => "Relative Strength Index (RSI)",
                IndicatorLine::Macd => "MACD",
                IndicatorLine::BbUpper => "Bollinger Bands Upper",
                IndicatorLine::BbMiddle => "Bollinger Bands Middle",
                IndicatorLine::BbLower => "Bollinger Bands Lower",
            },
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeriesKey::Price => "rgba(75, 192, 192, 1)",
            SeriesKey::Forecast => "rgba(255, 99, 132, 1)",
            SeriesKey::Indicator(line) => match line {
                IndicatorLine::Sma => "rgba(84, 227, 111, 1)",
                IndicatorLine::Ema => "rgba(227, 84, 225, 1)",
                IndicatorLine::Rsi => "rgba(255, 159, 64, 1)",
                IndicatorLine::Macd => "rgba(255, 206, 86, 1)",
                IndicatorLine::BbUpper => "rgba(225, 99, 132, 1)",
                IndicatorLine::BbMiddle => "rgba(153, 102, 255, 1)",
                IndicatorLine::BbLower => "rgba(54, 162, 235, 1)",
            },
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            SeriesKey::Indicator(IndicatorLine::Rsi) => Axis::Rsi,
            SeriesKey::Indicator(IndicatorLine::Macd) => Axis::Macd,
            _ => Axis::Price,
        }
    }
}

impl Serialize for SeriesKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// One x/y sample. `y` is `None` where the backend had no value
/// (e.g. the warm-up bars of a moving average), which renders as a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDateTime,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub key: SeriesKey,
    pub label: &'static str,
    pub color: &'static str,
    pub axis: Axis,
    /// Title of `axis`, for the UI to label it.
    pub axis_title: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn new(key: SeriesKey, points: Vec<ChartPoint>) -> Self {
        Self {
            key,
            label: key.label(),
            color: key.color(),
            axis: key.axis(),
            axis_title: key.axis().title(),
            points,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|p| p.y.is_none())
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// Chart-ready output of [`build`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// Price, forecast, then overlay indicators in selection order.
    pub primary: Vec<ChartSeries>,
    /// Oscillators in selection order.
    pub secondary: Vec<ChartSeries>,
}

impl ChartData {
    pub fn series(&self, key: SeriesKey) -> Option<&ChartSeries> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .find(|s| s.key == key)
    }

    /// Series with at least one drawable point, across both charts.
    pub fn non_empty(&self) -> impl Iterator<Item = &ChartSeries> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .filter(|s| !s.is_empty())
    }

    /// Whether the secondary (oscillator) chart has anything to show.
    pub fn has_secondary(&self) -> bool {
        !self.secondary.is_empty()
    }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Shape the historical and forecast series for display.
///
/// Indicator lines are always sourced from `historical`; forecast points carry
/// no indicator values. `indicators` is expected in selection order.
pub fn build(
    historical: &[StockPoint],
    forecast: &[StockPoint],
    indicators: &[Indicator],
) -> ChartData {
    let closes = |points: &[StockPoint]| -> Vec<ChartPoint> {
        points
            .iter()
            .map(|p| ChartPoint {
                x: p.date,
                y: Some(p.close),
            })
            .collect()
    };

    let mut data = ChartData {
        primary: vec![
            ChartSeries::new(SeriesKey::Price, closes(historical)),
            ChartSeries::new(SeriesKey::Forecast, closes(forecast)),
        ],
        secondary: Vec::new(),
    };

    for indicator in indicators {
        for line in IndicatorLine::for_indicator(*indicator) {
            let points = historical
                .iter()
                .map(|p| ChartPoint {
                    x: p.date,
                    y: p.value(*line),
                })
                .collect();
            let series = ChartSeries::new(SeriesKey::Indicator(*line), points);
            if indicator.is_oscillator() {
                data.secondary.push(series);
            } else {
                data.primary.push(series);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn keys(series: &[ChartSeries]) -> Vec<&'static str> {
        series.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn test_price_only() {
        let historical = vec![StockPoint::new(at(1), 100.0)];
        let data = build(&historical, &[], &[]);

        assert_eq!(keys(&data.primary), ["price", "forecast"]);
        assert!(data.secondary.is_empty());
        assert_eq!(data.non_empty().count(), 1);

        let price = data.series(SeriesKey::Price).unwrap();
        assert_eq!(price.values(), vec![Some(100.0)]);
        assert_eq!(price.label, "Stock Price");
        assert!(data.series(SeriesKey::Forecast).unwrap().points.is_empty());
    }

    #[test]
    fn test_sma_overlay_rsi_secondary() {
        let mut p1 = StockPoint::new(at(1), 100.0);
        p1.sma = Some(99.0);
        p1.rsi = Some(55.0);
        let mut p2 = StockPoint::new(at(2), 102.0);
        p2.sma = Some(100.0);
        p2.rsi = Some(61.0);
        let forecast = vec![StockPoint::new(at(3), 103.0)];

        let data = build(&[p1, p2], &forecast, &[Indicator::Sma, Indicator::Rsi]);

        assert_eq!(keys(&data.primary), ["price", "forecast", "sma"]);
        assert_eq!(keys(&data.secondary), ["rsi"]);

        let sma = data.series(SeriesKey::Indicator(IndicatorLine::Sma)).unwrap();
        assert_eq!(sma.values(), vec![Some(99.0), Some(100.0)]);
        assert_eq!(sma.points.last().unwrap().x, at(2));
        assert_eq!(sma.axis, Axis::Price);

        let rsi = &data.secondary[0];
        assert_eq!(rsi.axis, Axis::Rsi);
        assert_eq!(rsi.axis_title, "Relative Strength Index (RSI)");
        assert_eq!(sma.axis_title, "Stock Price and Moving Averages");
        assert_eq!(rsi.values(), vec![Some(55.0), Some(61.0)]);
    }

    #[test]
    fn test_indicators_follow_selection_order() {
        let historical = vec![StockPoint::new(at(1), 100.0)];
        let data = build(
            &historical,
            &[],
            &[Indicator::Macd, Indicator::Bbands, Indicator::Rsi, Indicator::Ema],
        );
        assert_eq!(
            keys(&data.primary),
            ["price", "forecast", "bb_upper", "bb_middle", "bb_lower", "ema"]
        );
        assert_eq!(keys(&data.secondary), ["macd", "rsi"]);
        assert!(data.has_secondary());
    }

    #[test]
    fn test_indicators_never_drawn_from_forecast() {
        let mut f = StockPoint::new(at(5), 110.0);
        f.sma = Some(108.0);
        let data = build(&[], &[f], &[Indicator::Sma]);
        let sma = data.series(SeriesKey::Indicator(IndicatorLine::Sma)).unwrap();
        assert!(sma.points.is_empty());
        assert!(sma.is_empty());
    }

    #[test]
    fn test_missing_values_become_gaps() {
        let mut p2 = StockPoint::new(at(2), 101.0);
        p2.ema = Some(100.5);
        let data = build(&[StockPoint::new(at(1), 100.0), p2], &[], &[Indicator::Ema]);
        let ema = data.series(SeriesKey::Indicator(IndicatorLine::Ema)).unwrap();
        assert_eq!(ema.values(), vec![None, Some(100.5)]);
        assert!(!ema.is_empty());
    }

    #[test]
    fn test_serializes_keys_as_strings() {
        let data = build(&[StockPoint::new(at(1), 100.0)], &[], &[Indicator::Rsi]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["primary"][0]["key"], "price");
        assert_eq!(json["secondary"][0]["axis"], "rsi");
        assert_eq!(json["secondary"][0]["axis_title"], "Relative Strength Index (RSI)");
        assert_eq!(json["primary"][0]["points"][0]["y"], 100.0);
    }
}
