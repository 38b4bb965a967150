//! Common types and utilities shared across the temperature-heatmap crates.

pub mod color;
pub mod dataset;
pub mod error;
pub mod month;

pub use color::Rgb;
pub use dataset::{MonthlyRecord, TemperatureDataset};
pub use error::{HeatmapError, HeatmapResult};
pub use month::Month;
