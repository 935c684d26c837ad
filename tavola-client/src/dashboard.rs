//! Admin dashboard poller
//!
//! Refetches the headline figures on a fixed interval and publishes each
//! outcome on a watch channel. Cancelling the token stops the loop and
//! drops a fetch that is still in flight.

use std::time::Duration;

use shared::models::DashboardStats;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::{HttpClient, TavolaClient};
use crate::config::MIN_POLL_INTERVAL;
use crate::query::QueryState;
use crate::services::AnalyticsService;

pub struct DashboardPoller {
    receiver: watch::Receiver<QueryState<DashboardStats>>,
    shutdown: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl DashboardPoller {
    /// Start polling at the configured dashboard interval
    pub fn spawn<C: HttpClient + 'static>(client: &TavolaClient<C>) -> Self {
        Self::spawn_with_interval(client.analytics(), client.config().dashboard_poll_interval)
    }

    /// Start polling every `interval`, raised to [`MIN_POLL_INTERVAL`]
    pub fn spawn_with_interval<C: HttpClient + 'static>(
        analytics: AnalyticsService<C>,
        interval: Duration,
    ) -> Self {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let (sender, receiver) = watch::channel(QueryState::loading());
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(run(analytics, interval, sender, shutdown.clone()));
        Self {
            receiver,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Receiver for every published state
    pub fn subscribe(&self) -> watch::Receiver<QueryState<DashboardStats>> {
        self.receiver.clone()
    }

    pub fn current(&self) -> QueryState<DashboardStats> {
        self.receiver.borrow().clone()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop the loop and wait for the task to end
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "Dashboard poller task failed");
        }
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run<C: HttpClient + 'static>(
    analytics: AnalyticsService<C>,
    period: Duration,
    sender: watch::Sender<QueryState<DashboardStats>>,
    shutdown: CancellationToken,
) {
    tracing::info!(interval_ms = period.as_millis() as u64, "Dashboard poller started");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        sender.send_modify(|state| state.loading = true);

        let result = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = analytics.dashboard() => result,
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Dashboard refresh failed");
        }
        let previous = sender.borrow().data.clone();
        sender.send_replace(QueryState::from_result(result, previous));
    }

    tracing::info!("Dashboard poller stopped");
}
