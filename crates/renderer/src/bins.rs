//! Equal-width color binning of the observed temperature range.
//!
//! The observed range `[min, max]` is cut into one contiguous bin per palette
//! entry. Lookup is upper-bound inclusive and lower-bound exclusive, except that
//! a value exactly at the global minimum matches only the first bin.

use heatmap_common::{HeatmapError, HeatmapResult, TemperatureDataset};
use serde::Serialize;

/// A temperature sub-range mapped to one display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub color: String,
}

/// Split `[min, max]` into `colors.len()` contiguous equal-width bins.
///
/// The last bin's upper bound is set to `max` exactly so the global maximum
/// always has a bin to land in.
pub fn color_range(min: f64, max: f64, colors: &[String]) -> HeatmapResult<Vec<ColorBin>> {
    if colors.is_empty() {
        return Err(HeatmapError::EmptyPalette);
    }
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(HeatmapError::InvalidBinRange { min, max });
    }

    let cuts = colors.len();
    let increment = (max - min) / cuts as f64;

    let bins = colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let upper_bound = if i + 1 == cuts {
                max
            } else {
                min + (i + 1) as f64 * increment
            };
            ColorBin {
                lower_bound: min + i as f64 * increment,
                upper_bound,
                color: color.clone(),
            }
        })
        .collect();

    Ok(bins)
}

/// Color bins together with the range they were cut from.
#[derive(Debug, Clone, Serialize)]
pub struct ColorBins {
    bins: Vec<ColorBin>,
    min: f64,
    max: f64,
}

impl ColorBins {
    pub fn new(min: f64, max: f64, colors: &[String]) -> HeatmapResult<Self> {
        Ok(Self {
            bins: color_range(min, max, colors)?,
            min,
            max,
        })
    }

    /// Bins spanning the dataset's observed temperature range.
    pub fn from_dataset(dataset: &TemperatureDataset, colors: &[String]) -> HeatmapResult<Self> {
        let (min, max) = dataset
            .temperature_extent()
            .ok_or(HeatmapError::EmptyDataset)?;
        Self::new(min, max, colors)
    }

    pub fn bins(&self) -> &[ColorBin] {
        &self.bins
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Index of the first bin matching `temperature`.
    pub fn lookup_index(&self, temperature: f64) -> Option<usize> {
        self.bins.iter().position(|bin| {
            if temperature == self.min {
                bin.lower_bound == temperature
            } else {
                temperature > bin.lower_bound && temperature <= bin.upper_bound
            }
        })
    }

    /// First bin matching `temperature`.
    pub fn lookup(&self, temperature: f64) -> Option<&ColorBin> {
        self.lookup_index(temperature).map(|i| &self.bins[i])
    }

    /// Fill color for `temperature`, or `ColorLookup` when no bin matches.
    pub fn color_for(&self, temperature: f64) -> HeatmapResult<&str> {
        self.lookup(temperature)
            .map(|bin| bin.color.as_str())
            .ok_or(HeatmapError::ColorLookup { temperature })
    }
}
