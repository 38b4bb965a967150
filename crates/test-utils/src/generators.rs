//! Synthetic dataset generators.
//!
//! These create predictable, verifiable datasets shaped like the real
//! monthly-variance file: one record per month, January first.

use heatmap_common::{MonthlyRecord, TemperatureDataset};

/// Creates a dataset with one record per month over `first_year..=last_year`.
///
/// Variance follows a deterministic pattern: a seasonal swing of ±2°C plus a
/// linear warming trend of 1.5°C across the whole period.
///
/// # Example
///
/// ```
/// use test_utils::create_monthly_dataset;
///
/// let dataset = create_monthly_dataset(1900, 1909, 8.66);
/// assert_eq!(dataset.monthly_variance.len(), 120);
/// assert_eq!(dataset.monthly_variance[0].month, 1);
/// ```
pub fn create_monthly_dataset(first_year: i32, last_year: i32, base: f64) -> TemperatureDataset {
    let span = f64::from((last_year - first_year).max(1));
    let mut records = Vec::new();
    for year in first_year..=last_year {
        let trend = f64::from(year - first_year) / span * 1.5;
        for month in 1..=12u8 {
            let phase = (f64::from(month) - 1.0) / 12.0 * std::f64::consts::TAU;
            let seasonal = -2.0 * phase.cos();
            records.push(MonthlyRecord::new(year, month, seasonal + trend));
        }
    }
    TemperatureDataset::new(base, records)
}

/// Creates a dataset whose temperatures step evenly from `min` to `max`.
///
/// Records run over consecutive months starting January `first_year`, so
/// `count` records cover `count / 12` years. The first record is exactly
/// `min` and the last exactly `max`.
pub fn create_linear_dataset(first_year: i32, count: usize, min: f64, max: f64) -> TemperatureDataset {
    let steps = count.saturating_sub(1).max(1) as f64;
    let records = (0..count)
        .map(|i| {
            let year = first_year + (i / 12) as i32;
            let month = (i % 12) as u8 + 1;
            let variance = if i + 1 == count {
                max
            } else {
                min + (max - min) * i as f64 / steps
            };
            MonthlyRecord::new(year, month, variance)
        })
        .collect();
    TemperatureDataset::new(0.0, records)
}
