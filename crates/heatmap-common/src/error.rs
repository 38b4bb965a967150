//! Error types for the temperature heatmap crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading, binning and rendering.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Load Errors ===
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    #[error("Failed to read dataset: {0}")]
    Io(String),

    #[error("Failed to decode dataset: {0}")]
    Decode(String),

    // === Dataset Errors ===
    #[error("Dataset contains no monthly records")]
    EmptyDataset,

    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    // === Binning Errors ===
    #[error("Invalid bin range: min {min} must be finite and below max {max}")]
    InvalidBinRange { min: f64, max: f64 },

    #[error("Color palette is empty")]
    EmptyPalette,

    #[error("No color bin matches temperature {temperature}")]
    ColorLookup { temperature: f64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // === Chart Errors ===
    #[error("No cell at chart position ({x}, {y})")]
    NoCellAt { x: f64, y: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl HeatmapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HeatmapError::InvalidRecord { .. }
            | HeatmapError::InvalidBinRange { .. }
            | HeatmapError::InvalidColor(_)
            | HeatmapError::Config(_) => 400,

            HeatmapError::NoCellAt { .. } => 404,

            HeatmapError::Fetch(_) => 502,

            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::Decode(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HeatmapError::Fetch("timeout".into()).http_status_code(), 502);
        assert_eq!(HeatmapError::NoCellAt { x: 0.0, y: 0.0 }.http_status_code(), 404);
        assert_eq!(HeatmapError::InvalidColor("#zz".into()).http_status_code(), 400);
        assert_eq!(HeatmapError::ColorLookup { temperature: 1.0 }.http_status_code(), 500);
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: HeatmapError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, HeatmapError::Decode(_)));
    }
}
