//! Custom serde helpers for backend wire formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A point date as the backend sends it.
///
/// Historical rows come out of a dataframe as `"2024-01-02"` (daily) or
/// `"2024-01-02 15:30:00"` (intraday). Forecast rows may carry RFC 3339
/// strings or epoch milliseconds depending on how the frame was serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Millis(i64),
    Text(String),
}

impl DateValue {
    /// Resolve to a naive (exchange-local) timestamp.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DateValue::Millis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
            DateValue::Text(s) => parse_datetime(s),
        }
    }
}

impl From<&str> for DateValue {
    fn from(s: &str) -> Self {
        DateValue::Text(s.to_string())
    }
}

/// Parse any of the textual date formats the backend emits.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Deserializes an `f64` sent either as a JSON number or a numeric string.
///
/// Upstream quote feeds deliver prices as strings (`"185.6400"`); the
/// backend passes them through untouched.
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("Invalid number: {}", s))),
        }
    }

    /// Optional variant: `null`, a missing field, and unparseable strings become `None`.
    pub mod option {
        use super::Raw;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(match Option::<Raw>::deserialize(deserializer)? {
                Some(Raw::Num(n)) if n.is_finite() => Some(n),
                Some(Raw::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
                _ => None,
            })
        }
    }
}
