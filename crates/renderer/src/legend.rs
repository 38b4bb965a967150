//! Color legend: one swatch per palette entry with a tick axis underneath.
//!
//! Tick labels come from a fixed affine formula over the `[1, 10]` legend domain,
//! not from the computed bin boundaries, so they only approximate the real bins.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::scale::ChartScales;
use crate::style::ChartStyle;

/// Vertical offset of the legend below the plot area's bottom edge.
pub const LEGEND_OFFSET: f64 = 100.0;

/// `intercept + (tick - 1) * slope`, rendered with `decimals` places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLabelFormula {
    pub intercept: f64,
    pub slope: f64,
    pub decimals: usize,
}

impl Default for LegendLabelFormula {
    fn default() -> Self {
        Self {
            intercept: 1.684,
            slope: 1.356,
            decimals: 2,
        }
    }
}

impl LegendLabelFormula {
    pub fn value(&self, tick: f64) -> f64 {
        self.intercept + (tick - 1.0) * self.slope
    }

    pub fn label(&self, tick: f64) -> String {
        format!("{:.*}", self.decimals, self.value(tick))
    }
}

/// A filled legend square, in legend-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSwatch {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
}

/// Legend group placed at `(0, translate_y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub translate_y: f64,
    pub swatches: Vec<LegendSwatch>,
    pub axis: Axis,
}

impl Legend {
    pub fn build(scales: &ChartScales, style: &ChartStyle) -> Self {
        let size = style.swatch_size;
        let swatches = style
            .palette
            .iter()
            .enumerate()
            .map(|(i, color)| LegendSwatch {
                x: style.padding.left + i as f64 * size,
                y: -size,
                size,
                color: color.clone(),
            })
            .collect();

        let formula = style.legend_label;
        let axis = Axis::bottom_linear(
            &scales.legend,
            style.legend_tick_count,
            move |tick| formula.label(tick),
            (0.0, 0.0),
        );

        Self {
            translate_y: f64::from(style.height) - style.padding.bottom + LEGEND_OFFSET,
            swatches,
            axis,
        }
    }
}
