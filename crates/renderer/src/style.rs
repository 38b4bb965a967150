//! Chart style configuration.
//!
//! Every field has a default, so an empty document yields the stock chart:
//! 1500x800 with the nine-color blue-to-red palette.

use heatmap_common::{HeatmapError, HeatmapResult, Rgb, TemperatureDataset};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::legend::LegendLabelFormula;

/// Default palette, coldest first.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#2596be", "#3ba1c5", "#51abcb", "#66b6d2", "#ffff80", "#ff9e4d", "#ff9033", "#ff821a",
    "#ff3600",
];

/// Space between the SVG edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub bottom: f64,
    pub top: f64,
    pub right: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 150.0,
            bottom: 200.0,
            top: 150.0,
            right: 25.0,
        }
    }
}

/// Dimensions, colors and text of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub padding: Padding,
    /// Fill colors from coldest bin to warmest.
    pub palette: Vec<String>,
    /// Edge length of a legend swatch in pixels.
    pub swatch_size: f64,
    pub x_tick_count: usize,
    pub legend_tick_count: usize,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub legend_label: LegendLabelFormula,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 800,
            padding: Padding::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            swatch_size: 30.0,
            x_tick_count: 10,
            legend_tick_count: 10,
            title: "Global land-surface temperature per month over years".to_string(),
            x_axis_label: "Year".to_string(),
            y_axis_label: "Month".to_string(),
            legend_label: LegendLabelFormula::default(),
        }
    }
}

impl ChartStyle {
    /// Parse a style from JSON.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        let mut style: Self =
            serde_json::from_str(json).map_err(|e| HeatmapError::Config(e.to_string()))?;
        style.normalize_palette()?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Rewrite every palette entry as lowercase `#rrggbb`.
    pub fn normalize_palette(&mut self) -> HeatmapResult<()> {
        self.palette = self
            .palette
            .iter()
            .map(|color| Rgb::from_hex(color).map(|rgb| rgb.to_hex()))
            .collect::<HeatmapResult<_>>()?;
        Ok(())
    }

    /// Check dimensions and palette.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeatmapError::Config(format!(
                "chart size {}x{} must be non-zero",
                self.width, self.height
            )));
        }

        let p = &self.padding;
        if [p.left, p.right, p.top, p.bottom]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(HeatmapError::Config(
                "padding must be finite and non-negative".to_string(),
            ));
        }
        if p.left + p.right >= f64::from(self.width) || p.top + p.bottom >= f64::from(self.height)
        {
            return Err(HeatmapError::Config(
                "padding leaves no room for the plot area".to_string(),
            ));
        }

        if self.palette.is_empty() {
            return Err(HeatmapError::EmptyPalette);
        }
        for color in &self.palette {
            Rgb::from_hex(color)?;
        }

        if !self.swatch_size.is_finite() || self.swatch_size <= 0.0 {
            return Err(HeatmapError::Config(format!(
                "swatch size {} must be positive",
                self.swatch_size
            )));
        }

        Ok(())
    }

    /// Subtitle derived from the dataset's year span and base temperature.
    pub fn description(&self, dataset: &TemperatureDataset) -> String {
        match dataset.year_extent() {
            Some((first, last)) => format!(
                "From {} to {}: base temperature of {} C",
                first, last, dataset.base_temperature
            ),
            None => format!("Base temperature of {} C", dataset.base_temperature),
        }
    }
}
