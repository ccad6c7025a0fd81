//! Conversions from wire types to domain types for stocks.

use super::wire::{StockInfoResponse, StockPointResponse};
use super::{PointError, StockInfo, StockPoint};
use crate::shared::serde_util::DateValue;

impl TryFrom<StockPointResponse> for StockPoint {
    type Error = PointError;

    fn try_from(p: StockPointResponse) -> Result<Self, Self::Error> {
        let date = p.date.to_datetime().ok_or_else(|| {
            PointError::InvalidDate(match &p.date {
                DateValue::Millis(ms) => ms.to_string(),
                DateValue::Text(s) => s.clone(),
            })
        })?;
        if !p.close.is_finite() {
            return Err(PointError::NonFiniteClose(date.to_string()));
        }

        Ok(Self {
            date,
            close: p.close,
            sma: p.sma,
            ema: p.ema,
            rsi: p.rsi,
            macd: p.macd,
            bb_upper: p.bb_upper,
            bb_middle: p.bb_middle,
            bb_lower: p.bb_lower,
        })
    }
}

/// Convert a full series, sorted ascending by date.
pub(crate) fn points_from_wire(rows: Vec<StockPointResponse>) -> Result<Vec<StockPoint>, PointError> {
    let mut points = rows
        .into_iter()
        .map(StockPoint::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    points.sort_by_key(|p| p.date);
    Ok(points)
}

impl From<StockInfoResponse> for StockInfo {
    fn from(r: StockInfoResponse) -> Self {
        let metrics = r
            .metrics
            .into_iter()
            .filter_map(|(key, value)| {
                let n = match value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }?;
                n.is_finite().then_some((key, n))
            })
            .collect();

        Self {
            name: r.name.unwrap_or_default(),
            sector: r.sector.unwrap_or_default(),
            website: r.website.unwrap_or_default(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: &str, close: f64) -> StockPointResponse {
        StockPointResponse {
            date: DateValue::from(date),
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

    #[test]
    fn test_point_conversion() {
        let mut r = row("2024-01-01", 100.0);
        r.ema = Some(99.0);
        let p = StockPoint::try_from(r).unwrap();
        assert_eq!(
            p.date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(p.close, 100.0);
        assert_eq!(p.ema, Some(99.0));
        assert_eq!(p.sma, None);
    }

    #[test]
    fn test_point_conversion_rejects_bad_date() {
        let err = StockPoint::try_from(row("01/02/2024", 100.0)).unwrap_err();
        assert_eq!(err, PointError::InvalidDate("01/02/2024".to_string()));
    }

    #[test]
    fn test_point_conversion_rejects_nan_close() {
        let err = StockPoint::try_from(row("2024-01-01", f64::NAN)).unwrap_err();
        assert!(matches!(err, PointError::NonFiniteClose(_)));
    }

    #[test]
    fn test_series_sorted_ascending() {
        // Time-series frames often come out newest first.
        let points = points_from_wire(vec![
            row("2024-01-03", 103.0),
            row("2024-01-01", 101.0),
            row("2024-01-02", 102.0),
        ])
        .unwrap();
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        assert_eq!(closes, [101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_info_conversion_drops_non_numeric_metrics() {
        let mut resp = StockInfoResponse {
            name: Some("Apple Inc.".into()),
            sector: None,
            website: Some("https://www.apple.com".into()),
            ..Default::default()
        };
        resp.metrics.insert("marketCap".into(), serde_json::json!(3.0e12));
        resp.metrics.insert("beta".into(), serde_json::json!("1.25"));
        resp.metrics.insert("note".into(), serde_json::json!("n/a"));
        resp.metrics.insert("pe".into(), serde_json::Value::Null);

        let info = StockInfo::from(resp);
        assert_eq!(info.name, "Apple Inc.");
        assert_eq!(info.sector, "");
        assert_eq!(info.metrics.len(), 2);
        assert_eq!(info.metric("beta"), Some(1.25));
        assert_eq!(info.metric("note"), None);
    }
}
