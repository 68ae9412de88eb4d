// Presentation layer - HTTP view server
pub mod app_state;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    click_marker, click_row, dismiss_overlay, get_chart, get_map, get_overlay, get_status,
    get_table, health_check, refresh,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/map", get(get_map))
        .route("/map/markers/:index/click", post(click_marker))
        .route("/table", get(get_table))
        .route("/table/rows/:index/click", post(click_row))
        .route("/chart", get(get_chart))
        .route("/overlay", get(get_overlay).delete(dismiss_overlay))
        .route("/status", get(get_status))
        .route("/refresh", post(refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
