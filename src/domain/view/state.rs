//! Dashboard state container — app-owned, SDK-provided update logic.

use super::ViewState;
use crate::domain::chart::{self, ChartData};
use crate::domain::stock::{StockInfo, StockPoint};

/// Everything the dashboard renders: the user's view plus fetched data.
///
/// The app owns instances of this type (directly or through
/// [`Dashboard`](crate::dashboard::Dashboard)). Fetched collections are
/// replaced wholesale; failures only touch `error`.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub view: ViewState,
    historical: Vec<StockPoint>,
    forecast: Vec<StockPoint>,
    info: Option<StockInfo>,
    error: Option<String>,
}

impl DashboardState {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    pub fn historical(&self) -> &[StockPoint] {
        &self.historical
    }

    pub fn forecast(&self) -> &[StockPoint] {
        &self.forecast
    }

    pub fn info(&self) -> Option<&StockInfo> {
        self.info.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply a successful historical fetch. The forecast belonged to the old
    /// series and is dropped.
    pub fn apply_historical(&mut self, points: Vec<StockPoint>) {
        self.historical = points;
        self.forecast.clear();
        self.error = None;
    }

    /// Apply a successful forecast. Historical data is left as is.
    pub fn apply_forecast(&mut self, points: Vec<StockPoint>) {
        self.forecast = points;
        self.error = None;
    }

    pub fn apply_info(&mut self, info: StockInfo) {
        self.info = Some(info);
    }

    /// Record a failure. Previously fetched data stays on screen.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Chart-ready series for the current data and indicator selection.
    pub fn chart_data(&self) -> ChartData {
        chart::build(&self.historical, &self.forecast, self.view.indicators())
    }
}
