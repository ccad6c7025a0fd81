//! Shared newtypes and enums used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend expects, so they can be used directly in wire types
//! and query strings without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// Newtype for ticker symbols (e.g. `"AAPL"`).
///
/// Input is trimmed and upper-cased on construction, so `"aapl "` and `"AAPL"`
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Symbol::new(s))
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Symbol::new(s))
    }
}

// ─── Interval ────────────────────────────────────────────────────────────────

/// Bar interval of the historical series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[default]
    #[serde(rename = "1d")]
    Day1,
}

impl Interval {
    pub const ALL: [Interval; 6] = [
        Self::Minute1,
        Self::Minute5,
        Self::Minute15,
        Self::Minute30,
        Self::Hour1,
        Self::Day1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Day1 => "1d",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("Unknown interval: {}", s))
    }
}

// ─── Indicator ───────────────────────────────────────────────────────────────

/// Technical indicator the backend can compute alongside the price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Sma,
    Ema,
    Rsi,
    Macd,
    Bbands,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [Self::Sma, Self::Ema, Self::Rsi, Self::Macd, Self::Bbands];

    /// Query/body key understood by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Bbands => "bbands",
        }
    }

    /// Oscillators live on their own axis instead of overlaying the price.
    pub fn is_oscillator(&self) -> bool {
        matches!(self, Self::Rsi | Self::Macd)
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == lower)
            .ok_or_else(|| format!("Unknown indicator: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_normalizes_input() {
        assert_eq!(Symbol::new(" aapl "), Symbol::from("AAPL"));
        assert_eq!(Symbol::new("msft").as_str(), "MSFT");
        assert!(Symbol::new("   ").is_empty());
    }

    #[test]
    fn test_symbol_serde() {
        let sym = Symbol::from("tsla");
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"TSLA\"");
        let back: Symbol = serde_json::from_str("\"tsla\"").unwrap();
        assert_eq!(sym, back);
    }

    #[test]
    fn test_interval_serde() {
        let i: Interval = serde_json::from_str("\"30m\"").unwrap();
        assert_eq!(i, Interval::Minute30);
        assert_eq!(serde_json::to_string(&Interval::Hour1).unwrap(), "\"1h\"");
    }

    #[test]
    fn test_interval_default_is_daily() {
        assert_eq!(Interval::default(), Interval::Day1);
    }

    #[test]
    fn test_interval_from_str() {
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::Minute15);
        assert!("4h".parse::<Interval>().is_err());
    }

    #[test]
    fn test_indicator_serde_and_parse() {
        let i: Indicator = serde_json::from_str("\"bbands\"").unwrap();
        assert_eq!(i, Indicator::Bbands);
        assert_eq!("RSI".parse::<Indicator>().unwrap(), Indicator::Rsi);
        assert!("vwap".parse::<Indicator>().is_err());
    }

    #[test]
    fn test_indicator_oscillators() {
        assert!(Indicator::Rsi.is_oscillator());
        assert!(Indicator::Macd.is_oscillator());
        assert!(!Indicator::Sma.is_oscillator());
        assert!(!Indicator::Bbands.is_oscillator());
    }
}
