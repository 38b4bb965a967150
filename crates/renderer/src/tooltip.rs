//! Hover behavior: cell outline and a single floating tooltip.
//!
//! `HoverController` owns the tooltip outright. Entering a cell creates it,
//! moving repositions it, leaving destroys it; there is never more than one.

use heatmap_common::Month;
use serde::Serialize;

use crate::chart::Cell;

/// Element id of the tooltip.
pub const TOOLTIP_ID: &str = "tooltip";
/// CSS transform that lifts the tooltip above and centers it on the pointer.
pub const TOOLTIP_TRANSFORM: &str = "translate(-50%, -100%) translateY(-20px)";
/// Gap between the pointer and the tooltip's bottom edge.
pub const TOOLTIP_OFFSET_Y: f64 = 20.0;
/// Outline applied to the hovered cell.
pub const HIGHLIGHT_STROKE: &str = "black";
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 2.0;

/// Format `value` with one decimal, rounding exact ties away from zero.
///
/// `{:.1}` already rounds on the exact binary value; only ties differ, and a
/// double sits exactly halfway between tenths only when it is an odd number
/// of quarters. Negative values keep their sign even when they round to zero.
pub fn format_one_decimal(value: f64) -> String {
    let magnitude = value.abs();
    let quarters = magnitude * 4.0;
    let digits = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (magnitude * 10.0 + 0.5).floor();
        format!("{:.1}", tenths / 10.0)
    } else {
        format!("{:.1}", magnitude)
    };

    if value < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Format a temperature with one decimal.
pub fn format_temperature(temperature: f64) -> String {
    format_one_decimal(temperature)
}

/// Format a variance with one decimal and an explicit `+` when positive.
pub fn format_variance(variance: f64) -> String {
    if variance > 0.0 {
        format!("+{}", format_one_decimal(variance))
    } else {
        format_one_decimal(variance)
    }
}

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the tooltip says about a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub year: i32,
    pub month: Month,
    pub temperature: f64,
    pub variance: f64,
}

impl TooltipContent {
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            year: cell.year,
            month: cell.month,
            temperature: cell.temperature,
            variance: cell.variance,
        }
    }

    pub fn temperature_label(&self) -> String {
        format_temperature(self.temperature)
    }

    pub fn variance_label(&self) -> String {
        format_variance(self.variance)
    }

    /// Three display lines: date, temperature, variance.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{} | {}", self.year, self.month),
            format!("Temperature: {} C", self.temperature_label()),
            format!("Variance: {}", self.variance_label()),
        ]
    }

    /// Markup used inside the HTML tooltip element.
    pub fn to_html(&self) -> String {
        format!(
            "{} | {} <br>Temperature: {} C <br> Variance: {}",
            self.year,
            self.month,
            self.temperature_label(),
            self.variance_label()
        )
    }

    /// Plain text for SVG `<title>` hints, one fact per line.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

/// The floating tooltip while a cell is hovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub data_year: i32,
    pub position: PagePoint,
    pub content: TooltipContent,
}

impl Tooltip {
    pub fn id(&self) -> &'static str {
        TOOLTIP_ID
    }

    pub fn transform(&self) -> &'static str {
        TOOLTIP_TRANSFORM
    }
}

/// Changes a hover event made, for callers that mirror them elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEffect {
    /// A cell was outlined and a tooltip created.
    Entered { cell: usize },
    /// The tooltip moved.
    Moved { position: PagePoint },
    /// The outline and tooltip were removed from `cell`.
    Left { cell: usize },
    /// Nothing was hovered, so nothing changed.
    None,
}

/// Tracks the hovered cell and owns its tooltip.
#[derive(Debug, Clone, Default)]
pub struct HoverController {
    highlighted: Option<usize>,
    tooltip: Option<Tooltip>,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered cell `index`: outline it and create the tooltip.
    ///
    /// Any previous tooltip is replaced.
    pub fn pointer_enter(&mut self, index: usize, cell: &Cell, at: PagePoint) -> HoverEffect {
        self.highlighted = Some(index);
        self.tooltip = Some(Tooltip {
            data_year: cell.year,
            position: at,
            content: TooltipContent::from_cell(cell),
        });
        HoverEffect::Entered { cell: index }
    }

    /// Pointer moved over the hovered cell: reposition the tooltip.
    pub fn pointer_move(&mut self, at: PagePoint) -> HoverEffect {
        match self.tooltip.as_mut() {
            Some(tooltip) => {
                tooltip.position = at;
                HoverEffect::Moved { position: at }
            }
            None => HoverEffect::None,
        }
    }

    /// Pointer left the hovered cell: drop the outline and the tooltip.
    pub fn pointer_leave(&mut self) -> HoverEffect {
        self.tooltip = None;
        match self.highlighted.take() {
            Some(cell) => HoverEffect::Left { cell },
            None => HoverEffect::None,
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted == Some(index)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_sign() {
        assert_eq!(format_variance(2.3), "+2.3");
        assert_eq!(format_variance(-1.05), "-1.1");
        assert_eq!(format_variance(0.0), "0.0");
    }

    #[test]
    fn test_move_without_hover_is_noop() {
        let mut hover = HoverController::new();
        assert_eq!(hover.pointer_move(PagePoint::new(1.0, 1.0)), HoverEffect::None);
        assert_eq!(hover.pointer_leave(), HoverEffect::None);
        assert!(hover.tooltip().is_none());
    }
}
