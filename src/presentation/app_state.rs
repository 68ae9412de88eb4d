// Application state for HTTP handlers
use crate::application::poll_loop::{DashboardEvent, PollStatus};
use crate::infrastructure::view_surfaces::ViewReceivers;
use tokio::sync::{mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    pub views: ViewReceivers,
    pub status: watch::Receiver<PollStatus>,
    pub events: mpsc::UnboundedSender<DashboardEvent>,
}
