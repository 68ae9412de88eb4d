// Live stream focus state
use super::point::Point;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FocusState {
    #[default]
    Idle,
    Focused { point: Point, source: String },
}

impl FocusState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FocusState::Idle)
    }

    pub fn focused_point(&self) -> Option<&Point> {
        match self {
            FocusState::Idle => None,
            FocusState::Focused { point, .. } => Some(point),
        }
    }
}

/// Stream URL for a location: `<base>/<id>`, with the id encoded as one path segment.
pub fn stream_url(base_url: &str, point: &Point) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(point.id.as_str())
    )
}
