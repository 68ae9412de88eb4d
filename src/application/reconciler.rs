// View reconciler - Rebuilds the marker layer and table from a snapshot
use crate::application::surfaces::{
    ClickHandler, MapSurface, SelectHandler, SelectOrigin, Selection, TableSurface,
};
use crate::domain::point::{GeoPosition, Point};
use crate::domain::view::{Marker, TableRow};
use std::sync::Arc;

pub struct ViewReconciler {
    map: Box<dyn MapSurface>,
    table: Box<dyn TableSurface>,
}

impl ViewReconciler {
    pub fn new(map: Box<dyn MapSurface>, table: Box<dyn TableSurface>) -> Self {
        Self { map, table }
    }

    /// Replace every marker and row with ones built from `points`, in order.
    ///
    /// Nothing from the previous render survives, including when `points` is empty.
    pub fn reconcile(&mut self, points: &[Point], on_select: &SelectHandler) {
        self.map.clear_markers();
        self.table.clear_rows();

        for point in points {
            self.map.add_marker(
                Marker::from_point(point),
                bind(on_select, point, SelectOrigin::Marker),
            );
            self.table.add_row(
                TableRow::from_point(point),
                bind(on_select, point, SelectOrigin::Row),
            );
        }

        self.map.present();
        self.table.present();
        tracing::debug!(points = points.len(), "reconciled map and table");
    }

    pub fn fly_to(&mut self, center: GeoPosition, zoom: u8) {
        self.map.fly_to(center, zoom);
    }
}

fn bind(on_select: &SelectHandler, point: &Point, origin: SelectOrigin) -> ClickHandler {
    let on_select = on_select.clone();
    let point = point.clone();
    Arc::new(move || {
        on_select(Selection {
            point: point.clone(),
            origin,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::{PointId, TrafficStatus};
    use crate::domain::severity::{BadgeTone, DisplayColor};
    use crate::domain::view::Viewport;
    use crate::infrastructure::view_surfaces::{MapView, MemoryMap, MemoryTable, TableView};
    use std::sync::Mutex;
    use tokio::sync::watch;

    fn point(id: &str, name: &str, count: u32, status: &str) -> Point {
        Point::new(
            PointId::new(id),
            name.to_string(),
            GeoPosition::new(-6.59, 106.79),
            count,
            TrafficStatus::from_label(status),
        )
    }

    fn setup() -> (
        ViewReconciler,
        watch::Receiver<MapView>,
        watch::Receiver<TableView>,
    ) {
        let (map, map_rx) = MemoryMap::new(Viewport {
            center: GeoPosition::new(-6.595, 106.797),
            zoom: 14,
        });
        let (table, table_rx) = MemoryTable::new();
        (
            ViewReconciler::new(Box::new(map), Box::new(table)),
            map_rx,
            table_rx,
        )
    }

    fn recording_handler() -> (SelectHandler, Arc<Mutex<Vec<Selection>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: SelectHandler = Arc::new(move |s: Selection| sink.lock().unwrap().push(s));
        (handler, seen)
    }

    #[test]
    fn test_reconcile_renders_in_snapshot_order() {
        let (mut reconciler, map_rx, table_rx) = setup();
        let (handler, _) = recording_handler();
        let points = vec![
            point("2", "B", 3, "Lancar"),
            point("1", "A", 16, "Padat"),
            point("3", "C", 9, "Ramai"),
        ];

        reconciler.reconcile(&points, &handler);

        let map = map_rx.borrow();
        let ids: Vec<&str> = map.markers.iter().map(|m| m.item.point_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert_eq!(map.markers[1].item.color, DisplayColor::Red);
        assert_eq!(map.markers[2].item.color, DisplayColor::Yellow);

        let table = table_rx.borrow();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].item.name, "A");
        assert_eq!(table.rows[1].item.count, 16);
        assert_eq!(table.rows[2].item.badge, BadgeTone::Warning);
    }

    #[test]
    fn test_empty_snapshot_clears_previous_render() {
        let (mut reconciler, map_rx, table_rx) = setup();
        let (handler, _) = recording_handler();
        reconciler.reconcile(
            &[point("1", "A", 1, "Lancar"), point("2", "B", 2, "Lancar")],
            &handler,
        );
        assert_eq!(map_rx.borrow().markers.len(), 2);

        reconciler.reconcile(&[], &handler);
        assert!(map_rx.borrow().markers.is_empty());
        assert!(table_rx.borrow().rows.is_empty());
    }

    #[test]
    fn test_full_replace_drops_stale_points() {
        let (mut reconciler, map_rx, table_rx) = setup();
        let (handler, _) = recording_handler();
        reconciler.reconcile(&[point("1", "A", 1, "Lancar")], &handler);
        reconciler.reconcile(&[point("2", "B", 2, "Lancar")], &handler);

        let map = map_rx.borrow();
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].item.point_id.as_str(), "2");
        assert_eq!(table_rx.borrow().rows[0].item.name, "B");
    }

    #[test]
    fn test_clicks_invoke_select_with_origin() {
        let (mut reconciler, map_rx, table_rx) = setup();
        let (handler, seen) = recording_handler();
        reconciler.reconcile(&[point("9", "Tugu Kujang", 4, "Lancar")], &handler);

        let marker_click = map_rx.borrow().markers[0].on_click.clone();
        let row_click = table_rx.borrow().rows[0].on_click.clone();
        marker_click();
        row_click();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].origin, SelectOrigin::Marker);
        assert_eq!(seen[0].point.name, "Tugu Kujang");
        assert_eq!(seen[1].origin, SelectOrigin::Row);
    }

    #[test]
    fn test_unknown_status_renders_neutral_badge() {
        let (mut reconciler, _map_rx, table_rx) = setup();
        let (handler, _) = recording_handler();
        reconciler.reconcile(&[point("1", "A", 1, "Unknown")], &handler);

        let table = table_rx.borrow();
        assert_eq!(table.rows[0].item.badge, BadgeTone::Secondary);
        assert_eq!(table.rows[0].item.status, "Unknown");
    }
}
