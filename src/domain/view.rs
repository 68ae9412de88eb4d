// Visual elements produced from a snapshot
use super::point::{GeoPosition, Point, PointId};
use super::severity::{classify, BadgeTone, DisplayColor, Severity};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub point_id: PointId,
    pub position: GeoPosition,
    pub severity: Severity,
    pub color: DisplayColor,
    pub count: u32,
    pub popup: String,
}

impl Marker {
    pub fn from_point(point: &Point) -> Self {
        let classification = classify(point.count);
        Self {
            point_id: point.id.clone(),
            position: point.position,
            severity: classification.severity,
            color: classification.color,
            count: point.count,
            popup: format!(
                "{} - {} vehicles ({})",
                point.name,
                point.count,
                point.status.label()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub point_id: PointId,
    pub name: String,
    pub status: String,
    pub badge: BadgeTone,
    pub count: u32,
}

impl TableRow {
    pub fn from_point(point: &Point) -> Self {
        Self {
            point_id: point.id.clone(),
            name: point.name.clone(),
            status: point.status.label().to_string(),
            badge: point.status.badge(),
            count: point.count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPosition,
    pub zoom: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::TrafficStatus;

    #[test]
    fn test_marker_and_row_from_point() {
        let point = Point::new(
            PointId::new("1"),
            "X".to_string(),
            GeoPosition::new(-6.6, 106.8),
            16,
            TrafficStatus::Padat,
        );

        let marker = Marker::from_point(&point);
        assert_eq!(marker.color, DisplayColor::Red);
        assert_eq!(marker.severity, Severity::Jammed);
        assert_eq!(marker.popup, "X - 16 vehicles (Padat)");

        let row = TableRow::from_point(&point);
        assert_eq!(row.count, 16);
        assert_eq!(row.badge, BadgeTone::Danger);
        assert_eq!(row.status, "Padat");
    }
}
