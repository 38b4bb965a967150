//! Heatmap rendering for monthly temperature variance.
//!
//! Pipeline stages:
//! - Color binning of the observed temperature range
//! - Year, month and legend scales
//! - Chart scene layout (title, axes, legend, cells)
//! - SVG serialization and PNG rasterization
//! - Hover state with a single owned tooltip

pub mod axis;
pub mod bins;
pub mod chart;
pub mod legend;
pub mod png;
pub mod scale;
pub mod style;
pub mod svg;
pub mod tooltip;

pub use bins::{color_range, ColorBin, ColorBins};
pub use chart::{build_chart, build_chart_with_bins, Cell, HeatmapChart, TextElement};
pub use legend::{Legend, LegendLabelFormula, LegendSwatch};
pub use scale::{BandScale, ChartScales, LinearScale};
pub use style::{ChartStyle, Padding, DEFAULT_PALETTE};
pub use svg::SvgOptions;
pub use tooltip::{HoverController, HoverEffect, PagePoint, Tooltip, TooltipContent};
