//! Tests for equal-width color binning and bin lookup.

use heatmap_common::HeatmapError;
use renderer::{color_range, ColorBins};
use test_utils::{assert_approx_eq, create_linear_dataset, palette, scenario_dataset};

/// Count bins a temperature satisfies under the lookup rule.
fn matching_bins(bins: &ColorBins, temperature: f64) -> usize {
    bins.bins()
        .iter()
        .filter(|bin| {
            if temperature == bins.min() {
                bin.lower_bound == temperature
            } else {
                temperature > bin.lower_bound && temperature <= bin.upper_bound
            }
        })
        .count()
}

// ============================================================================
// color_range
// ============================================================================

#[test]
fn test_one_bin_per_color() {
    let bins = color_range(0.0, 9.0, &palette()).unwrap();
    assert_eq!(bins.len(), 9);
    for (bin, color) in bins.iter().zip(palette()) {
        assert_eq!(bin.color, color);
    }
}

#[test]
fn test_bins_are_contiguous_and_ascending() {
    let bins = color_range(-3.5, 12.25, &palette()).unwrap();

    assert_eq!(bins[0].lower_bound, -3.5);
    assert_eq!(bins[bins.len() - 1].upper_bound, 12.25);
    for pair in bins.windows(2) {
        assert!(pair[0].lower_bound < pair[0].upper_bound);
        assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
    }
}

#[test]
fn test_bins_have_equal_width() {
    let bins = color_range(2.0, 11.0, &palette()).unwrap();
    for bin in &bins {
        assert_approx_eq!(bin.upper_bound - bin.lower_bound, 1.0, 1e-9);
    }
}

#[test]
fn test_invalid_ranges() {
    assert!(matches!(
        color_range(5.0, 5.0, &palette()),
        Err(HeatmapError::InvalidBinRange { .. })
    ));
    assert!(matches!(
        color_range(6.0, 5.0, &palette()),
        Err(HeatmapError::InvalidBinRange { .. })
    ));
    assert!(matches!(
        color_range(0.0, f64::INFINITY, &palette()),
        Err(HeatmapError::InvalidBinRange { .. })
    ));
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_scenario_extremes() {
    let dataset = scenario_dataset();
    let bins = ColorBins::from_dataset(&dataset, &palette()).unwrap();

    assert_approx_eq!(bins.min(), 2.46, 1e-9);
    assert_approx_eq!(bins.max(), 9.96, 1e-9);
    assert_eq!(bins.bins().len(), 9);
    assert_approx_eq!(
        bins.bins()[0].upper_bound - bins.bins()[0].lower_bound,
        0.8333,
        1e-3
    );

    assert_eq!(bins.lookup_index(bins.min()), Some(0));
    assert_eq!(bins.lookup_index(bins.max()), Some(8));
    assert_eq!(bins.color_for(bins.min()).unwrap(), "#2596be");
    assert_eq!(bins.color_for(bins.max()).unwrap(), "#ff3600");
}

#[test]
fn test_cut_point_belongs_to_lower_bin() {
    let bins = ColorBins::new(0.0, 9.0, &palette()).unwrap();
    let cut = bins.bins()[3].upper_bound;
    assert_eq!(bins.lookup_index(cut), Some(3));
    assert_eq!(matching_bins(&bins, cut), 1);
}

#[test]
fn test_every_record_matches_exactly_one_bin() {
    let dataset = create_linear_dataset(1900, 241, -2.0, 7.5);
    let bins = ColorBins::from_dataset(&dataset, &palette()).unwrap();

    for record in &dataset.monthly_variance {
        let temperature = dataset.temperature(record);
        assert_eq!(
            matching_bins(&bins, temperature),
            1,
            "temperature {} should match one bin",
            temperature
        );
    }
}

#[test]
fn test_cut_points_match_one_bin() {
    let bins = ColorBins::new(1.0, 4.0, &palette()).unwrap();
    for bin in bins.bins() {
        assert_eq!(matching_bins(&bins, bin.lower_bound), 1);
        assert_eq!(matching_bins(&bins, bin.upper_bound), 1);
    }
}

#[test]
fn test_out_of_range_is_lookup_error() {
    let bins = ColorBins::new(0.0, 9.0, &palette()).unwrap();

    assert_eq!(bins.lookup_index(-0.01), None);
    assert_eq!(bins.lookup_index(9.01), None);
    match bins.color_for(10.0) {
        Err(HeatmapError::ColorLookup { temperature }) => assert_eq!(temperature, 10.0),
        other => panic!("expected ColorLookup, got {:?}", other),
    }
}
