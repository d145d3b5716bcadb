use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::coords::{GeodeticPosition, SiteError};
use crate::elements::{Celestrak, ElementSetProvider, TleDirectory, DEFAULT_CELESTRAK_URL};
use crate::predict::{PassScanner, TrailingWindow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub station: Option<StationConfig>,
    #[serde(default)]
    pub elements: ElementsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
}

impl StationConfig {
    pub fn position(&self) -> Result<GeodeticPosition, SiteError> {
        GeodeticPosition::from_coordinates(&self.coordinates, self.altitude_m)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementsConfig {
    Celestrak {
        #[serde(default = "default_celestrak_url")]
        url: String,
    },
    Directory {
        path: PathBuf,
    },
}

impl Default for ElementsConfig {
    fn default() -> Self {
        ElementsConfig::Celestrak {
            url: default_celestrak_url(),
        }
    }
}

impl ElementsConfig {
    pub fn provider(&self) -> Box<dyn ElementSetProvider> {
        match self {
            ElementsConfig::Celestrak { url } => Box::new(Celestrak::new(url.clone())),
            ElementsConfig::Directory { path } => Box::new(TleDirectory::new(path.clone())),
        }
    }
}

fn default_celestrak_url() -> String {
    DEFAULT_CELESTRAK_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default)]
    pub trailing_window: TrailingWindow,
    #[serde(default)]
    pub min_peak_elevation_deg: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            trailing_window: TrailingWindow::default(),
            min_peak_elevation_deg: 0.0,
        }
    }
}

impl ScanConfig {
    pub fn scanner(&self) -> PassScanner {
        PassScanner::new(self.trailing_window).with_min_peak_elevation(self.min_peak_elevation_deg)
    }
}

fn default_step() -> String {
    "1m".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}
