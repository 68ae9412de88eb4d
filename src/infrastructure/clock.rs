// Wall-clock labels for the chart axis
use crate::application::poll_loop::TickClock;

/// Labels ticks with local time as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TickClock for SystemClock {
    fn label(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}
