// Monitored location domain model
use super::severity::BadgeTone;
use serde::Serialize;
use std::fmt;

/// Stable identifier of a monitored location, used as the join key across polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Congestion label reported by the source, independent of the locally computed band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrafficStatus {
    Padat,
    Ramai,
    Lancar,
    Other(String),
}

impl TrafficStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Padat" => TrafficStatus::Padat,
            "Ramai" => TrafficStatus::Ramai,
            "Lancar" => TrafficStatus::Lancar,
            other => TrafficStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TrafficStatus::Padat => "Padat",
            TrafficStatus::Ramai => "Ramai",
            TrafficStatus::Lancar => "Lancar",
            TrafficStatus::Other(label) => label,
        }
    }

    /// Unknown labels fall back to a neutral badge.
    pub fn badge(&self) -> BadgeTone {
        match self {
            TrafficStatus::Padat => BadgeTone::Danger,
            TrafficStatus::Ramai => BadgeTone::Warning,
            TrafficStatus::Lancar => BadgeTone::Success,
            TrafficStatus::Other(_) => BadgeTone::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub position: GeoPosition,
    pub count: u32,
    pub status: TrafficStatus,
}

impl Point {
    pub fn new(
        id: PointId,
        name: String,
        position: GeoPosition,
        count: u32,
        status: TrafficStatus,
    ) -> Self {
        Self {
            id,
            name,
            position,
            count,
            status,
        }
    }
}

/// Full state of every monitored location at one poll tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub points: Vec<Point>,
}

impl Snapshot {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
