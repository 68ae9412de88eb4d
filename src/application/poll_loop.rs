// Poll loop - Periodic snapshot acquisition and user interaction handling
use crate::application::focus_controller::FocusController;
use crate::application::reconciler::ViewReconciler;
use crate::application::snapshot_source::{FetchError, SnapshotSource};
use crate::application::surfaces::{ChartSurface, SelectHandler, SelectOrigin, Selection};
use crate::domain::point::Snapshot;
use crate::domain::series::{RollingSeriesStore, SeriesKey};
use crate::domain::severity::classify;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

/// Produces the axis label for the current poll cycle.
pub trait TickClock: Send + Sync {
    fn label(&self) -> String;
}

/// Everything that mutates dashboard state, funnelled through the loop's task.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    Refresh,
    Select(Selection),
    OverlayDismissed,
}

#[derive(Debug, Clone, Copy)]
enum FetchTrigger {
    Timer,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PollOutcome {
    Applied { points: usize },
    Empty,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollStatus {
    pub last_outcome: Option<PollOutcome>,
    pub last_attempt_at: Option<String>,
    pub last_success_at: Option<String>,
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
    pub completed_fetches: u64,
    pub skipped_triggers: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    /// Upper bound on one fetch; an elapsed fetch is reported as a failure.
    pub fetch_timeout: Duration,
    pub window: usize,
    pub series_key: SeriesKey,
    pub focus_zoom: u8,
}

pub struct PollLoop {
    source: Arc<dyn SnapshotSource>,
    reconciler: ViewReconciler,
    chart: Box<dyn ChartSurface>,
    focus: FocusController,
    store: RollingSeriesStore,
    clock: Box<dyn TickClock>,
    options: PollOptions,
    on_select: SelectHandler,
    status: watch::Sender<PollStatus>,
    in_flight: bool,
}

impl PollLoop {
    /// `events` is where marker and row clicks are posted back to this loop.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        reconciler: ViewReconciler,
        chart: Box<dyn ChartSurface>,
        focus: FocusController,
        clock: Box<dyn TickClock>,
        options: PollOptions,
        events: mpsc::UnboundedSender<DashboardEvent>,
    ) -> (Self, watch::Receiver<PollStatus>) {
        let on_select: SelectHandler = Arc::new(move |selection: Selection| {
            if events.send(DashboardEvent::Select(selection)).is_err() {
                tracing::warn!("poll loop is gone; dropping selection");
            }
        });
        let (status, status_rx) = watch::channel(PollStatus::default());

        let poll = Self {
            source,
            reconciler,
            chart,
            focus,
            store: RollingSeriesStore::new(options.window),
            clock,
            options,
            on_select,
            status,
            in_flight: false,
        };
        (poll, status_rx)
    }

    pub fn store(&self) -> &RollingSeriesStore {
        &self.store
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    /// Drive the loop until `shutdown` resolves: a fetch on every interval tick
    /// (the first one immediately) and on every refresh request, plus user interactions.
    ///
    /// At most one fetch is outstanding; triggers arriving meanwhile are dropped.
    /// Every fetch is bounded by `fetch_timeout`, so the slot always frees up.
    pub async fn run<F>(mut self, mut events: mpsc::UnboundedReceiver<DashboardEvent>, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (done_tx, mut done_rx) = mpsc::channel(1);

        tracing::info!(
            interval_secs = self.options.interval.as_secs_f64(),
            window = self.options.window,
            fetch_timeout_secs = self.options.fetch_timeout.as_secs_f64(),
            "poll loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.start_fetch(FetchTrigger::Timer, &done_tx),
                Some(result) = done_rx.recv() => {
                    self.in_flight = false;
                    self.apply(result);
                }
                Some(event) = events.recv() => match event {
                    DashboardEvent::Refresh => self.start_fetch(FetchTrigger::Manual, &done_tx),
                    DashboardEvent::Select(selection) => self.select(selection),
                    DashboardEvent::OverlayDismissed => self.dismiss_overlay(),
                },
                _ = &mut shutdown => break,
            }
        }

        tracing::info!("poll loop stopped");
    }

    fn start_fetch(
        &mut self,
        trigger: FetchTrigger,
        done: &mpsc::Sender<Result<Snapshot, FetchError>>,
    ) {
        if self.in_flight {
            tracing::debug!(?trigger, "fetch already in flight; dropping trigger");
            self.status.send_modify(|s| s.skipped_triggers += 1);
            return;
        }

        self.in_flight = true;
        tracing::debug!(?trigger, "fetching snapshot");
        let fetch = bounded_fetch(self.source.clone(), self.options.fetch_timeout);
        let done = done.clone();
        tokio::spawn(async move {
            let _ = done.send(fetch.await).await;
        });
    }

    /// Fetch one snapshot and apply it.
    pub async fn fetch_and_update(&mut self) -> PollOutcome {
        let result = bounded_fetch(self.source.clone(), self.options.fetch_timeout).await;
        self.apply(result)
    }

    /// Apply a fetch result. Failures and empty snapshots leave every view as it was.
    pub fn apply(&mut self, result: Result<Snapshot, FetchError>) -> PollOutcome {
        let now = chrono::Utc::now().to_rfc3339();

        let outcome = match result {
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch traffic snapshot");
                self.status.send_modify(|s| {
                    s.last_error = Some(e.to_string());
                    s.consecutive_failures += 1;
                });
                PollOutcome::Failed
            }
            Ok(snapshot) if snapshot.is_empty() => {
                tracing::warn!("snapshot carried no points; keeping current views");
                self.status.send_modify(|s| {
                    s.last_error = None;
                    s.consecutive_failures = 0;
                });
                PollOutcome::Empty
            }
            Ok(snapshot) => {
                let points = &snapshot.points;
                self.reconciler.reconcile(points, &self.on_select);

                self.store.tick(self.clock.label());
                for point in points {
                    let key = self.options.series_key.key_for(point);
                    self.store
                        .append(key, &point.name, point.count, classify(point.count).color);
                }
                self.chart.render(&self.store.frame());

                tracing::info!(points = points.len(), "applied traffic snapshot");
                self.status.send_modify(|s| {
                    s.last_success_at = Some(now.clone());
                    s.last_error = None;
                    s.consecutive_failures = 0;
                });
                PollOutcome::Applied {
                    points: points.len(),
                }
            }
        };

        self.status.send_modify(|s| {
            s.last_outcome = Some(outcome);
            s.last_attempt_at = Some(now);
            s.completed_fetches += 1;
        });
        outcome
    }

    /// Open the live stream for a clicked marker or row. Row clicks also recenter the map.
    pub fn select(&mut self, selection: Selection) {
        if selection.origin == SelectOrigin::Row {
            self.reconciler
                .fly_to(selection.point.position, self.options.focus_zoom);
        }
        self.focus.open(selection.point);
    }

    pub fn dismiss_overlay(&mut self) {
        self.focus.close();
    }
}

/// One fetch against `source`, always resolving: an elapsed `timeout` or a
/// panicking source comes back as an error instead of never answering.
async fn bounded_fetch(
    source: Arc<dyn SnapshotSource>,
    timeout: Duration,
) -> Result<Snapshot, FetchError> {
    let fetch = tokio::spawn(async move {
        tokio::time::timeout(timeout, source.fetch_snapshot())
            .await
            .unwrap_or(Err(FetchError::Timeout(timeout)))
    });

    match fetch.await {
        Ok(result) => result,
        Err(e) => Err(FetchError::Aborted(e.to_string())),
    }
}
