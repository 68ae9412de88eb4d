// HTTP request handlers
use crate::application::poll_loop::{DashboardEvent, PollStatus};
use crate::domain::chart::ChartFrame;
use crate::domain::view::{Marker, TableRow, Viewport};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct MapResponse {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
}

#[derive(Serialize)]
pub struct RowResponse {
    #[serde(flatten)]
    pub row: TableRow,
    pub badge_class: &'static str,
}

#[derive(Serialize)]
pub struct TableResponse {
    pub rows: Vec<RowResponse>,
}

#[derive(Serialize)]
pub struct ChartResponse {
    #[serde(flatten)]
    pub frame: ChartFrame,
    pub y_max: Option<u32>,
}

#[derive(Serialize)]
pub struct OverlayResponse {
    pub visible: bool,
    pub title: String,
    pub source: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapResponse> {
    let view = state.views.map.borrow();
    Json(MapResponse {
        viewport: view.viewport,
        markers: view.markers.iter().map(|m| m.item.clone()).collect(),
    })
}

pub async fn get_table(State(state): State<Arc<AppState>>) -> Json<TableResponse> {
    let view = state.views.table.borrow();
    Json(TableResponse {
        rows: view
            .rows
            .iter()
            .map(|r| RowResponse {
                badge_class: r.item.badge.css_class(),
                row: r.item.clone(),
            })
            .collect(),
    })
}

pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<ChartResponse> {
    let view = state.views.chart.borrow();
    Json(ChartResponse {
        frame: view.frame.clone(),
        y_max: view.y_max,
    })
}

pub async fn get_overlay(State(state): State<Arc<AppState>>) -> Json<OverlayResponse> {
    let view = state.views.overlay.borrow();
    Json(OverlayResponse {
        visible: view.visible,
        title: view.title.clone(),
        source: view.source.clone(),
    })
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<PollStatus> {
    Json(state.status.borrow().clone())
}

/// Fire the click callback of the marker at `index`
pub async fn click_marker(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    let on_click = state
        .views
        .map
        .borrow()
        .markers
        .get(index)
        .map(|m| m.on_click.clone());

    match on_click {
        Some(on_click) => {
            on_click();
            StatusCode::ACCEPTED
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Fire the click callback of the table row at `index`
pub async fn click_row(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    let on_click = state
        .views
        .table
        .borrow()
        .rows
        .get(index)
        .map(|r| r.on_click.clone());

    match on_click {
        Some(on_click) => {
            on_click();
            StatusCode::ACCEPTED
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Overlay dismissal signal
pub async fn dismiss_overlay(State(state): State<Arc<AppState>>) -> StatusCode {
    post_event(&state, DashboardEvent::OverlayDismissed)
}

/// Manual refresh trigger
pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    post_event(&state, DashboardEvent::Refresh)
}

fn post_event(state: &AppState, event: DashboardEvent) -> StatusCode {
    match state.events.send(event) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!(event = ?e.0, "poll loop is not running");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
