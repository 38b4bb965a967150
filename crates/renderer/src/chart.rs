//! Heatmap scene construction.
//!
//! `build_chart` turns a dataset and a style into a `HeatmapChart`: every piece
//! of the drawing with its final coordinates, ready for serialization.

use heatmap_common::{HeatmapError, HeatmapResult, Month, TemperatureDataset};
use tracing::debug;

use crate::axis::Axis;
use crate::bins::ColorBins;
use crate::legend::Legend;
use crate::scale::ChartScales;
use crate::style::ChartStyle;

/// Vertical distance from the top edge to the title baseline.
pub const TITLE_OFFSET: f64 = 50.0;
/// Gap between the title and the description.
pub const DESCRIPTION_OFFSET: f64 = 30.0;
/// Distance of the rotated y axis label from the plot's left edge.
pub const Y_LABEL_OFFSET: f64 = 100.0;
/// Distance of the x axis label below the plot's bottom edge.
pub const X_LABEL_OFFSET: f64 = 80.0;

/// A positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees around `(x, y)`.
    pub rotate: f64,
    /// CSS font-size, if not inherited.
    pub font_size: Option<&'static str>,
}

impl TextElement {
    fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            rotate: 0.0,
            font_size: None,
        }
    }

    fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    fn sized(mut self, font_size: &'static str) -> Self {
        self.font_size = Some(font_size);
        self
    }
}

/// One heatmap rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub year: i32,
    pub month: Month,
    pub temperature: f64,
    pub variance: f64,
}

impl Cell {
    /// Half-open containment: left/top edges inside, right/bottom outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// `date` attribute value, e.g. "January 1753".
    pub fn date_label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// A fully laid out heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapChart {
    pub width: u32,
    pub height: u32,
    pub title: TextElement,
    pub description: TextElement,
    pub y_axis: Axis,
    pub y_axis_label: TextElement,
    pub x_axis: Axis,
    pub x_axis_label: TextElement,
    pub legend: Legend,
    pub cells: Vec<Cell>,
}

impl HeatmapChart {
    /// Index of the cell under chart coordinate `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().position(|cell| cell.contains(x, y))
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

/// Lay out the heatmap for `dataset`.
///
/// Fails if the style is invalid, the temperature range cannot be binned, or a
/// record's temperature falls outside every bin.
pub fn build_chart(dataset: &TemperatureDataset, style: &ChartStyle) -> HeatmapResult<HeatmapChart> {
    style.validate()?;
    dataset.validate()?;

    let bins = ColorBins::from_dataset(dataset, &style.palette)?;
    build_chart_with_bins(dataset, style, &bins)
}

/// Lay out the heatmap using bins computed by the caller.
pub fn build_chart_with_bins(
    dataset: &TemperatureDataset,
    style: &ChartStyle,
    bins: &ColorBins,
) -> HeatmapResult<HeatmapChart> {
    let scales = ChartScales::build(dataset, style)?;
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let padding = &style.padding;

    let title_y = padding.top - TITLE_OFFSET;
    let title = TextElement::new(style.title.clone(), width / 2.0, title_y).sized("2em");
    let description = TextElement::new(
        style.description(dataset),
        width / 2.0,
        title_y + DESCRIPTION_OFFSET,
    );

    let month_names: Vec<&str> = Month::ALL.iter().map(|m| m.name()).collect();
    let y_axis = Axis::left_band(&scales.month, &month_names, (padding.left, 0.0)).with_id("y-axis");
    let y_axis_label = TextElement::new(
        style.y_axis_label.clone(),
        padding.left - Y_LABEL_OFFSET,
        height / 2.0,
    )
    .rotated(-90.0)
    .sized("1.5em");

    let x_axis = Axis::bottom_linear(
        &scales.year,
        style.x_tick_count,
        |year| format!("{}", year.round() as i64),
        (0.0, height - padding.bottom),
    )
    .with_id("x-axis");
    let x_axis_label = TextElement::new(
        style.x_axis_label.clone(),
        width / 2.0,
        height - padding.bottom + X_LABEL_OFFSET,
    )
    .sized("1.5em");

    let legend = Legend::build(&scales, style);

    let cell_width = scales.cell_width();
    let cell_height = scales.cell_height();
    let cells = dataset
        .monthly_variance
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let month = dataset
                .record_month(record)
                .ok_or_else(|| HeatmapError::InvalidRecord {
                    index,
                    message: format!("month {} is outside 1..=12", record.month),
                })?;
            let temperature = dataset.temperature(record);
            let fill = bins.color_for(temperature)?.to_string();

            Ok(Cell {
                x: scales.year_x(record.year),
                y: scales.month_y(month),
                width: cell_width,
                height: cell_height,
                fill,
                year: record.year,
                month,
                temperature,
                variance: record.variance,
            })
        })
        .collect::<HeatmapResult<Vec<_>>>()?;

    debug!(
        cells = cells.len(),
        cell_width,
        cell_height,
        "Built heatmap chart"
    );

    Ok(HeatmapChart {
        width: style.width,
        height: style.height,
        title,
        description,
        y_axis,
        y_axis_label,
        x_axis,
        x_axis_label,
        legend,
        cells,
    })
}
