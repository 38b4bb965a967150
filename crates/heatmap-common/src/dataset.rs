//! Monthly global land-surface temperature dataset.
//!
//! The JSON document has the shape:
//!
//! ```json
//! { "baseTemperature": 8.66,
//!   "monthlyVariance": [ { "year": 1753, "month": 1, "variance": -1.366 }, ... ] }
//! ```
//!
//! Actual temperature for a record is `baseTemperature + variance`.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};
use crate::month::Month;

/// A base temperature plus monthly deviations from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureDataset {
    /// Reference temperature in °C.
    pub base_temperature: f64,
    /// Monthly deviations, in file order.
    pub monthly_variance: Vec<MonthlyRecord>,
}

/// One month's deviation from the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year: i32,
    /// 1-based month number.
    pub month: u8,
    /// Delta from the base temperature in °C.
    pub variance: f64,
}

impl MonthlyRecord {
    pub fn new(year: i32, month: u8, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }
}

impl TemperatureDataset {
    pub fn new(base_temperature: f64, monthly_variance: Vec<MonthlyRecord>) -> Self {
        Self {
            base_temperature,
            monthly_variance,
        }
    }

    /// Decode a dataset from JSON and validate it.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Decode a dataset from raw bytes and validate it.
    pub fn from_slice(bytes: &[u8]) -> HeatmapResult<Self> {
        let dataset: Self = serde_json::from_slice(bytes)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check that the dataset can be charted.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.monthly_variance.is_empty() {
            return Err(HeatmapError::EmptyDataset);
        }
        if !self.base_temperature.is_finite() {
            return Err(HeatmapError::InvalidRecord {
                index: 0,
                message: format!("base temperature {} is not finite", self.base_temperature),
            });
        }

        for (index, record) in self.monthly_variance.iter().enumerate() {
            if Month::from_number(record.month).is_none() {
                return Err(HeatmapError::InvalidRecord {
                    index,
                    message: format!("month {} is outside 1..=12", record.month),
                });
            }
            if !record.variance.is_finite() {
                return Err(HeatmapError::InvalidRecord {
                    index,
                    message: format!("variance {} is not finite", record.variance),
                });
            }
        }

        Ok(())
    }

    /// Actual temperature of a record.
    pub fn temperature(&self, record: &MonthlyRecord) -> f64 {
        self.base_temperature + record.variance
    }

    /// Month of a record, if its month number is valid.
    pub fn record_month(&self, record: &MonthlyRecord) -> Option<Month> {
        Month::from_number(record.month)
    }

    /// Number of monthly records.
    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// Minimum and maximum actual temperature.
    pub fn temperature_extent(&self) -> Option<(f64, f64)> {
        let mut records = self.monthly_variance.iter();
        let first = self.temperature(records.next()?);
        Some(records.fold((first, first), |(min, max), record| {
            let t = self.temperature(record);
            (min.min(t), max.max(t))
        }))
    }

    /// First and last year covered.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let mut records = self.monthly_variance.iter();
        let first = records.next()?.year;
        Some(records.fold((first, first), |(min, max), record| {
            (min.min(record.year), max.max(record.year))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_of_empty_dataset() {
        let dataset = TemperatureDataset::new(8.66, vec![]);
        assert_eq!(dataset.temperature_extent(), None);
        assert_eq!(dataset.year_extent(), None);
    }

    #[test]
    fn test_temperature_adds_base() {
        let dataset = TemperatureDataset::new(8.0, vec![MonthlyRecord::new(1900, 3, -0.5)]);
        assert_eq!(dataset.temperature(&dataset.monthly_variance[0]), 7.5);
        assert_eq!(
            dataset.record_month(&dataset.monthly_variance[0]),
            Some(Month::March)
        );
    }
}
