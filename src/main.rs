// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::EnvFilter;

use crate::application::focus_controller::FocusController;
use crate::application::poll_loop::{PollLoop, PollOptions};
use crate::application::reconciler::ViewReconciler;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_snapshot_source::HttpSnapshotSource;
use crate::infrastructure::view_surfaces::{
    MemoryChart, MemoryMap, MemoryOverlay, MemoryTable, ViewReceivers,
};
use crate::presentation::app_state::AppState;
use crate::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = load_settings()?;

    // Create snapshot source (infrastructure layer)
    let source = Arc::new(HttpSnapshotSource::new(settings.api.url.clone()));

    // Create rendering surfaces
    let (map, map_rx) = MemoryMap::new(settings.map.initial_viewport());
    let (table, table_rx) = MemoryTable::new();
    let (chart, chart_rx) = MemoryChart::new(settings.chart.y_max);
    let (overlay, overlay_rx) = MemoryOverlay::new();

    // Create poll loop (application layer)
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (poll, status_rx) = PollLoop::new(
        source,
        ViewReconciler::new(Box::new(map), Box::new(table)),
        Box::new(chart),
        FocusController::new(Box::new(overlay), settings.video.base_url.clone()),
        Box::new(SystemClock),
        PollOptions {
            interval: settings.poll.interval(),
            fetch_timeout: settings.poll.fetch_timeout(),
            window: settings.chart.window,
            series_key: settings.chart.series_key,
            focus_zoom: settings.map.focus_zoom,
        },
        events_tx.clone(),
    );
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let poll_task = tokio::spawn(poll.run(events_rx, async {
        let _ = stop_rx.await;
    }));

    // Create application state
    let state = Arc::new(AppState {
        views: ViewReceivers {
            map: map_rx,
            table: table_rx,
            chart: chart_rx,
            overlay: overlay_rx,
        },
        status: status_rx,
        events: events_tx,
    });

    // Start view server (presentation layer)
    let addr: SocketAddr = settings.server.bind.parse()?;
    tracing::info!(%addr, api = %settings.api.url, "starting traffic-watch");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    let _ = stop_tx.send(());
    if let Err(e) = poll_task.await {
        tracing::error!(error = %e, "poll loop task failed");
    }
    tracing::info!("traffic-watch stopped");

    Ok(())
}
