// Chart data handed to the chart surface
use super::severity::DisplayColor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub key: String,
    pub name: String,
    pub color: DisplayColor,
    pub values: Vec<u32>,
}

impl ChartSeries {
    pub fn new(key: String, name: String, color: DisplayColor, values: Vec<u32>) -> Self {
        Self {
            key,
            name,
            color,
            values,
        }
    }
}

/// One render of the volume chart: a shared label axis and every series aligned to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartFrame {
    pub fn new(labels: Vec<String>, series: Vec<ChartSeries>) -> Self {
        Self { labels, series }
    }

    pub fn series(&self, key: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.key == key)
    }
}
