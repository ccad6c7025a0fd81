//! View domain — the user's selection (symbol, interval, dates, indicators).

pub mod state;

use crate::domain::stock::wire::ForecastRequest;
use crate::domain::stock::HistoricalQuery;
use crate::shared::{Indicator, Interval, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::DashboardState;

/// Default symbol shown when a session starts.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Default number of periods to forecast.
pub const DEFAULT_FORECAST_PERIOD: u32 = 30;

// ─── ViewField ───────────────────────────────────────────────────────────────

/// Identifies a ViewState field, mainly to decide whether an edit refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewField {
    Symbol,
    Interval,
    StartDate,
    EndDate,
    ForecastPeriod,
    Indicators,
}

impl ViewField {
    /// Fields whose change schedules a debounced refresh.
    pub fn is_watched(&self) -> bool {
        !matches!(self, ViewField::ForecastPeriod)
    }
}

// ─── ViewState ───────────────────────────────────────────────────────────────

/// What the user is looking at. Created with defaults, mutated by input,
/// never persisted.
///
/// Setters return `Ok(true)` when the value changed, `Ok(false)` when the new
/// value equals the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    symbol: Symbol,
    interval: Interval,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    forecast_period: u32,
    /// Ordered by selection; no duplicates.
    indicators: Vec<Indicator>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            symbol: Symbol::from(DEFAULT_SYMBOL),
            interval: Interval::default(),
            start_date: None,
            end_date: None,
            forecast_period: DEFAULT_FORECAST_PERIOD,
            indicators: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Getters ──────────────────────────────────────────────────────────

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn forecast_period(&self) -> u32 {
        self.forecast_period
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn has_indicator(&self, indicator: Indicator) -> bool {
        self.indicators.contains(&indicator)
    }

    // ── Setters ──────────────────────────────────────────────────────────

    pub fn set_symbol(&mut self, symbol: impl Into<Symbol>) -> bool {
        replace(&mut self.symbol, symbol.into())
    }

    pub fn set_interval(&mut self, interval: Interval) -> bool {
        replace(&mut self.interval, interval)
    }

    pub fn set_start_date(&mut self, start: Option<NaiveDate>) -> Result<bool, ViewStateError> {
        check_range(start, self.end_date)?;
        Ok(replace(&mut self.start_date, start))
    }

    pub fn set_end_date(&mut self, end: Option<NaiveDate>) -> Result<bool, ViewStateError> {
        check_range(self.start_date, end)?;
        Ok(replace(&mut self.end_date, end))
    }

    /// Set both bounds at once, so a range can move past the old one in a single edit.
    pub fn set_date_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<bool, ViewStateError> {
        check_range(start, end)?;
        let start_changed = replace(&mut self.start_date, start);
        let end_changed = replace(&mut self.end_date, end);
        Ok(start_changed || end_changed)
    }

    pub fn set_forecast_period(&mut self, period: u32) -> Result<bool, ViewStateError> {
        if period == 0 {
            return Err(ViewStateError::InvalidForecastPeriod);
        }
        Ok(replace(&mut self.forecast_period, period))
    }

    /// Replace the selection. Duplicates are dropped, first occurrence wins.
    pub fn set_indicators(&mut self, indicators: impl IntoIterator<Item = Indicator>) -> bool {
        let mut deduped: Vec<Indicator> = Vec::new();
        for indicator in indicators {
            if !deduped.contains(&indicator) {
                deduped.push(indicator);
            }
        }
        replace(&mut self.indicators, deduped)
    }

    /// Select the indicator if absent (appending it), deselect it otherwise.
    /// Returns whether it is selected afterwards.
    pub fn toggle_indicator(&mut self, indicator: Indicator) -> bool {
        if let Some(pos) = self.indicators.iter().position(|i| *i == indicator) {
            self.indicators.remove(pos);
            false
        } else {
            self.indicators.push(indicator);
            true
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────────

    pub fn historical_query(&self) -> HistoricalQuery {
        HistoricalQuery {
            symbol: self.symbol.clone(),
            interval: self.interval,
            start_date: self.start_date,
            end_date: self.end_date,
            indicators: self.indicators.clone(),
        }
    }

    pub fn forecast_request(&self) -> ForecastRequest {
        ForecastRequest {
            symbol: self.symbol.clone(),
            interval: self.interval,
            start_date: self.start_date,
            end_date: self.end_date,
            forecast_period: self.forecast_period,
            indicators: self.indicators.clone(),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ViewStateError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(ViewStateError::InvalidDateRange { start: s, end: e }),
        _ => Ok(()),
    }
}

// ─── ViewStateError ──────────────────────────────────────────────────────────

/// A rejected edit. The view state is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewStateError {
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    InvalidForecastPeriod,
}

impl fmt::Display for ViewStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewStateError::InvalidDateRange { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            ViewStateError::InvalidForecastPeriod => {
                write!(f, "Forecast period must be a positive number of periods")
            }
        }
    }
}

impl std::error::Error for ViewStateError {}

impl From<ViewStateError> for crate::error::SdkError {
    fn from(e: ViewStateError) -> Self {
        crate::error::SdkError::Validation(e.to_string())
    }
}
