use crate::domain::point::GeoPosition;
use crate::domain::series::{SeriesKey, DEFAULT_WINDOW};
use crate::domain::view::Viewport;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub video: VideoSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_y_max")]
    pub y_max: Option<u32>,
    #[serde(default)]
    pub series_key: SeriesKey,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_y_max() -> Option<u32> {
    Some(150)
}

fn default_center_lat() -> f64 {
    -6.595
}

fn default_center_lng() -> f64 {
    106.797
}

fn default_zoom() -> u8 {
    14
}

fn default_focus_zoom() -> u8 {
    16
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            window: default_window(),
            y_max: default_y_max(),
            series_key: SeriesKey::default(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl MapSettings {
    pub fn initial_viewport(&self) -> Viewport {
        Viewport {
            center: GeoPosition::new(self.center_lat, self.center_lng),
            zoom: self.zoom,
        }
    }
}

impl Settings {
    fn validate(&self) -> Result<(), SettingsError> {
        if self.poll.interval_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "poll.interval_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.poll.fetch_timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "poll.fetch_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.chart.window == 0 {
            return Err(SettingsError::Invalid {
                key: "chart.window",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.api.url.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "api.url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load `config/traffic.*` (optional) overlaid with `TRAFFIC_WATCH__*` environment variables.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/traffic").required(false))
        .add_source(config::Environment::with_prefix("TRAFFIC_WATCH").separator("__"));

    settings_from(builder)
}

fn settings_from(builder: ConfigBuilder<DefaultState>) -> Result<Settings, SettingsError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
