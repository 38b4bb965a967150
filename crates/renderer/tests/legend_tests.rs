//! Tests for the color legend.

use renderer::legend::LEGEND_OFFSET;
use renderer::{build_chart, ChartStyle, LegendLabelFormula};
use test_utils::{palette, scenario_dataset};

#[test]
fn test_one_swatch_per_color() {
    let chart = build_chart(&scenario_dataset(), &ChartStyle::default()).unwrap();
    let legend = &chart.legend;

    assert_eq!(legend.translate_y, 600.0 + LEGEND_OFFSET);
    assert_eq!(legend.swatches.len(), 9);
    for (i, (swatch, color)) in legend.swatches.iter().zip(palette()).enumerate() {
        assert_eq!(swatch.x, 150.0 + i as f64 * 30.0);
        assert_eq!(swatch.y, -30.0);
        assert_eq!(swatch.size, 30.0);
        assert_eq!(swatch.color, color);
    }
}

#[test]
fn test_tick_labels_follow_formula() {
    let chart = build_chart(&scenario_dataset(), &ChartStyle::default()).unwrap();
    let labels: Vec<&str> = chart
        .legend
        .axis
        .ticks
        .iter()
        .map(|t| t.label.as_str())
        .collect();

    assert_eq!(labels.len(), 10);
    assert_eq!(labels[0], "1.68");
    assert_eq!(labels[1], "3.04");
    assert_eq!(labels[9], "13.89");
}

#[test]
fn test_ticks_span_swatches() {
    let chart = build_chart(&scenario_dataset(), &ChartStyle::default()).unwrap();
    let ticks = &chart.legend.axis.ticks;

    assert_eq!(ticks[0].offset, 150.0);
    assert_eq!(ticks[9].offset, 420.0);
}

#[test]
fn test_custom_formula() {
    let style = ChartStyle::from_json(
        r#"{"legend_label": {"intercept": 0.0, "slope": 1.0, "decimals": 0}}"#,
    )
    .unwrap();
    let chart = build_chart(&scenario_dataset(), &style).unwrap();

    assert_eq!(chart.legend.axis.ticks[0].label, "0");
    assert_eq!(chart.legend.axis.ticks[9].label, "9");
    assert_eq!(LegendLabelFormula::default().decimals, 2);
}
