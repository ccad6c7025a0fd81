//! Dashboard orchestration: view edits, debounced refetch, forecast trigger.
//!
//! [`Dashboard`] owns a [`DashboardState`] behind an async lock. Edits to
//! watched view fields restart a quiescence window; when the window elapses
//! the historical series and stock info are fetched concurrently for the
//! view as it is at that moment. Forecasts run on demand and are never
//! debounced.
//!
//! ```rust,ignore
//! use stockdash_sdk::prelude::*;
//!
//! let client = StockdashClient::builder().build()?;
//! let dashboard = Dashboard::new(client, DashboardConfig::default());
//! dashboard.refresh_now().await?;
//!
//! dashboard.set_symbol("msft").await?;
//! dashboard.toggle_indicator(Indicator::Rsi).await?;
//! // ...500ms later, one refetch for MSFT with RSI.
//!
//! dashboard.forecast().await?;
//! let chart = dashboard.chart_data().await;
//! ```

pub mod debounce;
mod fetch;

pub use debounce::Debouncer;

use crate::client::StockApi;
use crate::domain::chart::ChartData;
use crate::domain::view::{DashboardState, ViewField, ViewState, ViewStateError};
use crate::error::SdkError;
use crate::shared::{Indicator, Interval, Symbol};
use fetch::Shared;

use async_lock::{RwLock, RwLockReadGuard};
use chrono::NaiveDate;
use futures_util::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default quiescence window before a refetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

const DEFAULT_EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub debounce_window: Duration,
    pub initial_view: ViewState,
    /// Capacity of the event channel. Events are dropped when it is full.
    pub event_buffer: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE,
            initial_view: ViewState::default(),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// Notifications for a UI layer to re-render on.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A watched field changed and the window (re)started.
    RefreshScheduled,
    RefreshStarted { symbol: Symbol },
    HistoricalLoaded { points: usize },
    InfoLoaded,
    ForecastLoaded { points: usize },
    /// A fetch failed; the message is also stored in the state.
    Error(String),
}

/// Stateful dashboard session over any [`StockApi`].
pub struct Dashboard<A: StockApi + 'static> {
    api: Arc<A>,
    state: Arc<RwLock<DashboardState>>,
    debouncer: Debouncer,
    shared: Arc<Shared>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<DashboardEvent>>,
}

impl<A: StockApi + 'static> Dashboard<A> {
    pub fn new(api: A, config: DashboardConfig) -> Self {
        Self::from_arc(Arc::new(api), config)
    }

    /// Share one API client between several dashboards.
    pub fn from_arc(api: Arc<A>, config: DashboardConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer.max(1));
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::new(config.initial_view))),
            debouncer: Debouncer::new(config.debounce_window),
            shared: Arc::new(Shared::new(event_tx)),
            event_rx: tokio::sync::Mutex::new(event_rx),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Borrow the state. Hold the guard briefly: dispatches wait on it.
    pub async fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().await
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn view(&self) -> ViewState {
        self.state.read().await.view.clone()
    }

    pub async fn chart_data(&self) -> ChartData {
        self.state.read().await.chart_data()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(str::to_string)
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// Whether a debounced refresh is waiting out its window or in flight.
    pub fn is_refresh_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Stream of dashboard events. Only one consumer receives each event.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = DashboardEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }

    // ── View edits ───────────────────────────────────────────────────────

    pub async fn set_symbol(&self, symbol: impl Into<Symbol>) -> Result<bool, SdkError> {
        let symbol = symbol.into();
        self.edit(ViewField::Symbol, |view| Ok(view.set_symbol(symbol)))
            .await
    }

    pub async fn set_interval(&self, interval: Interval) -> Result<bool, SdkError> {
        self.edit(ViewField::Interval, |view| Ok(view.set_interval(interval)))
            .await
    }

    pub async fn set_start_date(&self, start: Option<NaiveDate>) -> Result<bool, SdkError> {
        self.edit(ViewField::StartDate, |view| view.set_start_date(start))
            .await
    }

    pub async fn set_end_date(&self, end: Option<NaiveDate>) -> Result<bool, SdkError> {
        self.edit(ViewField::EndDate, |view| view.set_end_date(end))
            .await
    }

    pub async fn set_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<bool, SdkError> {
        self.edit(ViewField::StartDate, |view| view.set_date_range(start, end))
            .await
    }

    /// Takes effect on the next [`forecast`](Self::forecast); nothing is refetched.
    pub async fn set_forecast_period(&self, period: u32) -> Result<bool, SdkError> {
        self.edit(ViewField::ForecastPeriod, |view| {
            view.set_forecast_period(period)
        })
        .await
    }

    pub async fn set_indicators(
        &self,
        indicators: impl IntoIterator<Item = Indicator>,
    ) -> Result<bool, SdkError> {
        let indicators: Vec<Indicator> = indicators.into_iter().collect();
        self.edit(ViewField::Indicators, |view| {
            Ok(view.set_indicators(indicators))
        })
        .await
    }

    /// Flip one indicator. Returns whether it is selected afterwards.
    pub async fn toggle_indicator(&self, indicator: Indicator) -> Result<bool, SdkError> {
        self.ensure_open()?;
        let selected = self.state.write().await.view.toggle_indicator(indicator);
        self.schedule_refresh();
        Ok(selected)
    }

    async fn edit<F>(&self, field: ViewField, apply: F) -> Result<bool, SdkError>
    where
        F: FnOnce(&mut ViewState) -> Result<bool, ViewStateError>,
    {
        self.ensure_open()?;
        let changed = apply(&mut self.state.write().await.view)?;
        if changed && field.is_watched() {
            self.schedule_refresh();
        }
        Ok(changed)
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    fn schedule_refresh(&self) {
        let generation = self.shared.next_generation();
        self.shared.emit(DashboardEvent::RefreshScheduled);
        self.debouncer.schedule(fetch::refresh(
            Arc::clone(&self.api),
            Arc::clone(&self.state),
            Arc::clone(&self.shared),
            generation,
        ));
    }

    /// Fetch immediately, superseding any pending debounced refresh.
    pub async fn refresh_now(&self) -> Result<(), SdkError> {
        self.ensure_open()?;
        self.debouncer.cancel();
        let generation = self.shared.next_generation();
        fetch::refresh(
            Arc::clone(&self.api),
            Arc::clone(&self.state),
            Arc::clone(&self.shared),
            generation,
        )
        .await;
        Ok(())
    }

    /// Request a forecast for the current view. Not debounced.
    ///
    /// On failure the error is stored in the state and also returned; the
    /// historical series is left untouched. Returns the number of points.
    pub async fn forecast(&self) -> Result<usize, SdkError> {
        self.ensure_open()?;
        fetch::forecast(self.api.as_ref(), &self.state, &self.shared).await
    }

    /// Stop all background work. No request is issued and no state is
    /// written after this returns.
    pub async fn teardown(&mut self) {
        if self.shared.is_closed() {
            return;
        }
        self.shared.close();
        self.debouncer.cancel();
        // Wait out any dispatch that is mid-write.
        drop(self.state.write().await);
        tracing::debug!("Dashboard torn down");
    }

    fn ensure_open(&self) -> Result<(), SdkError> {
        if self.shared.is_closed() {
            Err(SdkError::Closed)
        } else {
            Ok(())
        }
    }
}

impl<A: StockApi + 'static> Drop for Dashboard<A> {
    fn drop(&mut self) {
        self.shared.close();
    }
}
