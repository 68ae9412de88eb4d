// In-memory rendering surfaces published over watch channels
use crate::application::surfaces::{
    ChartSurface, ClickHandler, MapSurface, OverlaySurface, TableSurface,
};
use crate::domain::chart::ChartFrame;
use crate::domain::point::GeoPosition;
use crate::domain::view::{Marker, TableRow, Viewport};
use std::fmt;
use tokio::sync::watch;

/// A rendered element together with the callback its click fires.
#[derive(Clone)]
pub struct Rendered<T> {
    pub item: T,
    pub on_click: ClickHandler,
}

impl<T: fmt::Debug> fmt::Debug for Rendered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendered").field("item", &self.item).finish()
    }
}

#[derive(Debug, Clone)]
pub struct MapView {
    pub viewport: Viewport,
    pub markers: Vec<Rendered<Marker>>,
}

#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub rows: Vec<Rendered<TableRow>>,
}

#[derive(Debug, Clone, Default)]
pub struct ChartView {
    pub frame: ChartFrame,
    pub y_max: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub title: String,
    pub source: String,
}

/// Read handles for every surface, shared with the HTTP layer.
#[derive(Debug, Clone)]
pub struct ViewReceivers {
    pub map: watch::Receiver<MapView>,
    pub table: watch::Receiver<TableView>,
    pub chart: watch::Receiver<ChartView>,
    pub overlay: watch::Receiver<OverlayView>,
}

pub struct MemoryMap {
    viewport: Viewport,
    markers: Vec<Rendered<Marker>>,
    tx: watch::Sender<MapView>,
}

impl MemoryMap {
    pub fn new(viewport: Viewport) -> (Self, watch::Receiver<MapView>) {
        let (tx, rx) = watch::channel(MapView {
            viewport,
            markers: Vec::new(),
        });
        let map = Self {
            viewport,
            markers: Vec::new(),
            tx,
        };
        (map, rx)
    }
}

impl MapSurface for MemoryMap {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker, on_click: ClickHandler) {
        self.markers.push(Rendered {
            item: marker,
            on_click,
        });
    }

    fn fly_to(&mut self, center: GeoPosition, zoom: u8) {
        self.viewport = Viewport { center, zoom };
        self.present();
    }

    fn present(&mut self) {
        self.tx.send_replace(MapView {
            viewport: self.viewport,
            markers: self.markers.clone(),
        });
    }
}

pub struct MemoryTable {
    rows: Vec<Rendered<TableRow>>,
    tx: watch::Sender<TableView>,
}

impl MemoryTable {
    pub fn new() -> (Self, watch::Receiver<TableView>) {
        let (tx, rx) = watch::channel(TableView::default());
        (
            Self {
                rows: Vec::new(),
                tx,
            },
            rx,
        )
    }
}

impl TableSurface for MemoryTable {
    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn add_row(&mut self, row: TableRow, on_click: ClickHandler) {
        self.rows.push(Rendered {
            item: row,
            on_click,
        });
    }

    fn present(&mut self) {
        self.tx.send_replace(TableView {
            rows: self.rows.clone(),
        });
    }
}

pub struct MemoryChart {
    y_max: Option<u32>,
    tx: watch::Sender<ChartView>,
}

impl MemoryChart {
    pub fn new(y_max: Option<u32>) -> (Self, watch::Receiver<ChartView>) {
        let (tx, rx) = watch::channel(ChartView {
            frame: ChartFrame::default(),
            y_max,
        });
        (Self { y_max, tx }, rx)
    }
}

impl ChartSurface for MemoryChart {
    fn render(&mut self, frame: &ChartFrame) {
        self.tx.send_replace(ChartView {
            frame: frame.clone(),
            y_max: self.y_max,
        });
    }
}

pub struct MemoryOverlay {
    tx: watch::Sender<OverlayView>,
}

impl MemoryOverlay {
    pub fn new() -> (Self, watch::Receiver<OverlayView>) {
        let (tx, rx) = watch::channel(OverlayView::default());
        (Self { tx }, rx)
    }
}

impl OverlaySurface for MemoryOverlay {
    fn show(&mut self, title: &str, source: &str) {
        self.tx.send_replace(OverlayView {
            visible: true,
            title: title.to_string(),
            source: source.to_string(),
        });
    }

    fn release(&mut self) {
        self.tx.send_modify(|view| {
            view.source.clear();
            view.visible = false;
        });
    }
}
