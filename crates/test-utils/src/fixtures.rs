//! Common test fixtures for heatmap tests.

use heatmap_common::{MonthlyRecord, TemperatureDataset};

/// Two-record dataset spanning the full reference period.
///
/// Temperatures are 2.46 (global minimum, January 1753) and 9.96 (global
/// maximum, December 2015).
pub const SCENARIO_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": [
        {"year": 1753, "month": 1, "variance": -6.2},
        {"year": 2015, "month": 12, "variance": 1.3}
    ]
}"#;

/// Base temperature of the reference dataset in °C.
pub const BASE_TEMPERATURE: f64 = 8.66;

/// First and last year of the reference dataset.
pub const FIRST_YEAR: i32 = 1753;
pub const LAST_YEAR: i32 = 2015;

/// The default nine-color palette, coldest first.
pub fn palette() -> Vec<String> {
    [
        "#2596be", "#3ba1c5", "#51abcb", "#66b6d2", "#ffff80", "#ff9e4d", "#ff9033", "#ff821a",
        "#ff3600",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// The decoded scenario dataset.
pub fn scenario_dataset() -> TemperatureDataset {
    TemperatureDataset::new(
        BASE_TEMPERATURE,
        vec![
            MonthlyRecord::new(FIRST_YEAR, 1, -6.2),
            MonthlyRecord::new(LAST_YEAR, 12, 1.3),
        ],
    )
}

/// Serialize a dataset in the camelCase wire shape.
pub fn dataset_json(dataset: &TemperatureDataset) -> String {
    serde_json::to_string(dataset).expect("dataset serializes")
}
