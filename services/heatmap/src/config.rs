//! Service configuration loaded from YAML.
//!
//! ```yaml
//! data_source: global-temperature.json
//! request_timeout_secs: 30
//! style:
//!   width: 1500
//!   palette: ["#2596be", "#ff3600"]
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use renderer::ChartStyle;
use serde::Deserialize;
use tracing::{debug, info};

/// Root configuration. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL or file path of the dataset.
    pub data_source: String,
    pub request_timeout_secs: u64,
    pub style: ChartStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            request_timeout_secs: 30,
            style: ChartStyle::default(),
        }
    }
}

fn default_data_source() -> String {
    "global-temperature.json".to_string()
}

impl AppConfig {
    /// Load from `path`, or use defaults when no path is given.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), data_source = %config.data_source, "Loaded config");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.style.normalize_palette()?;
        config.style.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
