// Rolling per-location volume history
use super::chart::{ChartFrame, ChartSeries};
use super::point::Point;
use super::severity::DisplayColor;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};

/// Samples kept per series, and labels kept on the shared axis.
pub const DEFAULT_WINDOW: usize = 16;

/// Which point attribute identifies a chart series across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKey {
    #[default]
    Id,
    Name,
}

impl SeriesKey {
    pub fn key_for<'a>(&self, point: &'a Point) -> &'a str {
        match self {
            SeriesKey::Id => point.id.as_str(),
            SeriesKey::Name => &point.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RollingSeries {
    name: String,
    color: DisplayColor,
    samples: VecDeque<u32>,
}

impl RollingSeries {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> DisplayColor {
        self.color
    }

    pub fn samples(&self) -> Vec<u32> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Capped time-series buffers keyed by series key, aligned on one label axis.
///
/// Series are created on first sight and never removed, so a location that
/// drops out of later snapshots keeps its last samples on the chart.
#[derive(Debug, Clone)]
pub struct RollingSeriesStore {
    window: usize,
    labels: VecDeque<String>,
    series: Vec<(String, RollingSeries)>,
    index: HashMap<String, usize>,
}

impl RollingSeriesStore {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            labels: VecDeque::with_capacity(window),
            series: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Push one axis label. Call once per poll cycle, before any `append`.
    pub fn tick(&mut self, label: impl Into<String>) {
        while self.labels.len() >= self.window {
            self.labels.pop_front();
        }
        self.labels.push_back(label.into());
    }

    /// Push one sample for `key`, creating the series if unseen.
    ///
    /// `name` and `color` always reflect the most recent call.
    pub fn append(&mut self, key: &str, name: &str, value: u32, color: DisplayColor) {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.series.push((
                    key.to_string(),
                    RollingSeries {
                        name: name.to_string(),
                        color,
                        samples: VecDeque::with_capacity(self.window),
                    },
                ));
                let idx = self.series.len() - 1;
                self.index.insert(key.to_string(), idx);
                tracing::debug!(series = key, name, "created rolling series");
                idx
            }
        };

        let window = self.window;
        let series = &mut self.series[idx].1;
        while series.samples.len() >= window {
            series.samples.pop_front();
        }
        series.samples.push_back(value);
        series.color = color;
        if series.name != name {
            series.name = name.to_string();
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<&RollingSeries> {
        self.index.get(key).map(|idx| &self.series[*idx].1)
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Snapshot of the axis and every series in creation order.
    pub fn frame(&self) -> ChartFrame {
        let series = self
            .series
            .iter()
            .map(|(key, s)| ChartSeries::new(key.clone(), s.name.clone(), s.color, s.samples()))
            .collect();
        ChartFrame::new(self.labels(), series)
    }
}

impl Default for RollingSeriesStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
