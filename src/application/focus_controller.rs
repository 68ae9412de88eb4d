// Focus controller - Owns the single live stream overlay
use crate::application::surfaces::OverlaySurface;
use crate::domain::focus::{stream_url, FocusState};
use crate::domain::point::Point;

pub struct FocusController {
    overlay: Box<dyn OverlaySurface>,
    video_base_url: String,
    state: FocusState,
}

impl FocusController {
    pub fn new(overlay: Box<dyn OverlaySurface>, video_base_url: String) -> Self {
        Self {
            overlay,
            video_base_url,
            state: FocusState::Idle,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Focus `point`, replacing any current focus. The overlay's media source is
    /// overwritten, so the previous stream is dropped by the same assignment.
    pub fn open(&mut self, point: Point) {
        let source = stream_url(&self.video_base_url, &point);
        let title = format!("Live Stream - {}", point.name);

        if let FocusState::Focused { point: previous, .. } = &self.state {
            tracing::debug!(previous = %previous.id, next = %point.id, "replacing focused stream");
        }

        self.overlay.show(&title, &source);
        tracing::info!(point = %point.id, source = %source, "opened live stream");
        self.state = FocusState::Focused { point, source };
    }

    /// Handle the overlay's dismissal: empty the stream source and go idle.
    pub fn close(&mut self) {
        self.overlay.release();
        if let FocusState::Focused { point, .. } = std::mem::take(&mut self.state) {
            tracing::info!(point = %point.id, "closed live stream");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::{GeoPosition, PointId, TrafficStatus};
    use crate::infrastructure::view_surfaces::{MemoryOverlay, OverlayView};
    use tokio::sync::watch;

    fn point(id: &str, name: &str) -> Point {
        Point::new(
            PointId::new(id),
            name.to_string(),
            GeoPosition::new(-6.6, 106.8),
            5,
            TrafficStatus::Lancar,
        )
    }

    fn setup() -> (FocusController, watch::Receiver<OverlayView>) {
        let (overlay, rx) = MemoryOverlay::new();
        (
            FocusController::new(Box::new(overlay), "https://cams.example/video_feed".to_string()),
            rx,
        )
    }

    #[test]
    fn test_open_shows_overlay_for_point() {
        let (mut focus, rx) = setup();
        focus.open(point("4", "Baranangsiang"));

        let view = rx.borrow().clone();
        assert!(view.visible);
        assert_eq!(view.title, "Live Stream - Baranangsiang");
        assert_eq!(view.source, "https://cams.example/video_feed/4");
        assert_eq!(focus.state().focused_point().map(|p| p.id.as_str()), Some("4"));
    }

    #[test]
    fn test_reopen_replaces_previous_stream() {
        let (mut focus, rx) = setup();
        focus.open(point("1", "A"));
        focus.open(point("2", "B"));

        let view = rx.borrow().clone();
        assert_eq!(view.source, "https://cams.example/video_feed/2");
        assert_eq!(view.title, "Live Stream - B");
        assert_eq!(focus.state().focused_point().map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn test_close_releases_stream() {
        let (mut focus, rx) = setup();
        focus.open(point("1", "A"));
        focus.close();

        assert!(focus.state().is_idle());
        let view = rx.borrow().clone();
        assert_eq!(view.source, "");
        assert!(!view.visible);
    }

    #[test]
    fn test_close_while_idle_is_harmless() {
        let (mut focus, rx) = setup();
        focus.close();
        assert!(focus.state().is_idle());
        assert_eq!(rx.borrow().source, "");
    }
}
