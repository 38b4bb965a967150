//! Axis geometry: a domain line plus labelled ticks, in axis-local coordinates.

use crate::scale::{BandScale, LinearScale};

/// Length of tick marks and of the domain line's end caps.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Left,
    Bottom,
}

/// A labelled tick at `offset` along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub offset: f64,
    pub label: String,
}

/// An axis, translated into place by `translate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub id: Option<String>,
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    /// Extent of the domain line along the axis.
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

impl Axis {
    /// Left axis with one tick centered on each band.
    pub fn left_band<S: AsRef<str>>(band: &BandScale, labels: &[S], translate: (f64, f64)) -> Self {
        let ticks = labels
            .iter()
            .enumerate()
            .take(band.count())
            .map(|(i, label)| AxisTick {
                offset: band.center(i),
                label: label.as_ref().to_string(),
            })
            .collect();

        let start = band.position(0);
        let end = band.position(band.count().saturating_sub(1)) + band.bandwidth();
        Self {
            id: None,
            orient: AxisOrient::Left,
            translate,
            range: (start.min(end), start.max(end)),
            ticks,
        }
    }

    /// Bottom axis with round ticks from a linear scale.
    pub fn bottom_linear(
        scale: &LinearScale,
        count: usize,
        format: impl Fn(f64) -> String,
        translate: (f64, f64),
    ) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| AxisTick {
                offset: scale.map(value),
                label: format(value),
            })
            .collect();

        Self {
            id: None,
            orient: AxisOrient::Bottom,
            translate,
            range: scale.range(),
            ticks,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// SVG path data for the domain line with outer end caps.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = self.range;
        match self.orient {
            AxisOrient::Left => format!("M{},{}H0V{}H{}", -TICK_SIZE, r0, r1, -TICK_SIZE),
            AxisOrient::Bottom => format!("M{},{}V0H{}V{}", r0, TICK_SIZE, r1, TICK_SIZE),
        }
    }
}
