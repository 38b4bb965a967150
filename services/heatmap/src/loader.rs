//! Dataset retrieval.
//!
//! A source is either an HTTP(S) URL or a local file path. Loading makes one
//! attempt: no retry, no fallback.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use heatmap_common::{HeatmapError, HeatmapResult, TemperatureDataset};
use reqwest::Client;
use tracing::{info, instrument};

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    Path(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` are URLs; anything else is a file path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and decodes `TemperatureDataset` documents.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    client: Client,
}

impl DatasetLoader {
    pub fn new(timeout: Duration) -> HeatmapResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HeatmapError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Retrieve and decode the dataset.
    ///
    /// Network failures and non-success statuses are `Fetch`, unreadable files
    /// are `Io`, and malformed bodies are `Decode` or `InvalidRecord`.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn load(&self, source: &DatasetSource) -> HeatmapResult<TemperatureDataset> {
        let bytes = match source {
            DatasetSource::Url(url) => self.fetch(url).await?,
            DatasetSource::Path(path) => tokio::fs::read(path).await?,
        };

        let dataset = TemperatureDataset::from_slice(&bytes)?;
        info!(
            records = dataset.len(),
            base_temperature = dataset.base_temperature,
            "Loaded dataset"
        );
        Ok(dataset)
    }

    async fn fetch(&self, url: &str) -> HeatmapResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HeatmapError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeatmapError::Fetch(format!(
                "Request to {} returned HTTP {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HeatmapError::Fetch(format!("Reading body from {} failed: {}", url, e)))?;
        Ok(body.to_vec())
    }
}
