//! Dispatch bodies for the debounced refresh and the forecast trigger.

use super::DashboardEvent;
use crate::client::StockApi;
use crate::domain::view::DashboardState;
use crate::error::SdkError;

use async_lock::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// State shared between the dashboard handle and its dispatch tasks.
pub(super) struct Shared {
    closed: AtomicBool,
    generation: AtomicU64,
    event_tx: mpsc::Sender<DashboardEvent>,
}

impl Shared {
    pub(super) fn new(event_tx: mpsc::Sender<DashboardEvent>) -> Self {
        Self {
            closed: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            event_tx,
        }
    }

    pub(super) fn emit(&self, event: DashboardEvent) {
        let _ = self.event_tx.try_send(event);
    }

    pub(super) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub(super) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Start a new dispatch generation; older ones become stale.
    pub(super) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a dispatch of `generation` may still write state.
    pub(super) fn is_current(&self, generation: u64) -> bool {
        !self.is_closed() && self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Fetch the historical series and stock info for the current view, concurrently.
///
/// Each result is applied independently: a failed metadata request does not
/// discard a good series and vice versa.
pub(super) async fn refresh<A>(
    api: Arc<A>,
    state: Arc<RwLock<DashboardState>>,
    shared: Arc<Shared>,
    generation: u64,
) where
    A: StockApi + ?Sized,
{
    let query = state.read().await.view.historical_query();
    if query.symbol.is_empty() {
        tracing::debug!("No symbol selected, skipping refresh");
        return;
    }
    if !shared.is_current(generation) {
        return;
    }

    tracing::info!(
        symbol = %query.symbol,
        interval = %query.interval,
        indicators = query.indicators.len(),
        "Fetching historical data and stock info"
    );
    shared.emit(DashboardEvent::RefreshStarted {
        symbol: query.symbol.clone(),
    });

    let (historical, info) = tokio::join!(api.historical(&query), api.stock_info(&query.symbol));

    let mut state = state.write().await;
    if !shared.is_current(generation) {
        tracing::debug!(generation, "Discarding superseded refresh");
        return;
    }

    match historical {
        Ok(points) => {
            let count = points.len();
            state.apply_historical(points);
            tracing::debug!(symbol = %query.symbol, count, "Historical data loaded");
            shared.emit(DashboardEvent::HistoricalLoaded { points: count });
        }
        Err(e) => {
            tracing::error!(symbol = %query.symbol, "Error fetching historical data: {}", e);
            record_error(&mut state, &shared, "Error fetching historical data", &e);
        }
    }

    match info {
        Ok(info) => {
            state.apply_info(info);
            shared.emit(DashboardEvent::InfoLoaded);
        }
        Err(e) => {
            tracing::error!(symbol = %query.symbol, "Error fetching stock info: {}", e);
            record_error(&mut state, &shared, "Error fetching stock info", &e);
        }
    }
}

/// Request a forecast for the current view and apply it.
pub(super) async fn forecast<A>(
    api: &A,
    state: &RwLock<DashboardState>,
    shared: &Shared,
) -> Result<usize, SdkError>
where
    A: StockApi + ?Sized,
{
    let request = state.read().await.view.forecast_request();
    tracing::info!(
        symbol = %request.symbol,
        period = request.forecast_period,
        "Requesting forecast"
    );

    let result = api.forecast(&request).await;

    let mut state = state.write().await;
    if shared.is_closed() {
        return Err(SdkError::Closed);
    }

    match result {
        Ok(points) => {
            let count = points.len();
            state.apply_forecast(points);
            shared.emit(DashboardEvent::ForecastLoaded { points: count });
            Ok(count)
        }
        Err(e) => {
            tracing::error!(symbol = %request.symbol, "Error fetching forecast data: {}", e);
            record_error(&mut state, shared, "Error fetching forecast data", &e);
            Err(e)
        }
    }
}

fn record_error(state: &mut DashboardState, shared: &Shared, context: &str, error: &SdkError) {
    let message = format!("{}: {}", context, error.user_message());
    state.set_error(message.clone());
    shared.emit(DashboardEvent::Error(message));
}
