// Rendering surface traits consumed by the reconciler and focus controller
use crate::domain::chart::ChartFrame;
use crate::domain::point::{GeoPosition, Point};
use crate::domain::view::{Marker, TableRow};
use std::sync::Arc;

/// Where a selection came from. Row selections also recenter the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOrigin {
    Marker,
    Row,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub point: Point,
    pub origin: SelectOrigin,
}

/// Invoked when the user activates a marker or row.
pub type SelectHandler = Arc<dyn Fn(Selection) + Send + Sync>;

/// Click callback bound to one rendered element.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

pub trait MapSurface: Send {
    fn clear_markers(&mut self);

    fn add_marker(&mut self, marker: Marker, on_click: ClickHandler);

    fn fly_to(&mut self, center: GeoPosition, zoom: u8);

    /// Publish pending changes. Called once after a batch of edits.
    fn present(&mut self) {}
}

pub trait TableSurface: Send {
    fn clear_rows(&mut self);

    fn add_row(&mut self, row: TableRow, on_click: ClickHandler);

    fn present(&mut self) {}
}

pub trait ChartSurface: Send {
    fn render(&mut self, frame: &ChartFrame);
}

pub trait OverlaySurface: Send {
    /// Show the overlay with a title and point the media element at `source`.
    fn show(&mut self, title: &str, source: &str);

    /// Empty the media source, which tears down the stream connection, and hide.
    fn release(&mut self);
}
