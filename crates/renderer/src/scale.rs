//! Coordinate scales for the heatmap.
//!
//! - Year scale: continuous, `[min year, max year]` to the plot's horizontal extent.
//! - Month scale: discrete bands, January at the top.
//! - Legend scale: continuous `[1, 10]` across the legend swatches, used only for
//!   legend tick placement.

use heatmap_common::{HeatmapError, HeatmapResult, Month, TemperatureDataset};

use crate::style::ChartStyle;

/// Domain of the legend tick scale.
pub const LEGEND_DOMAIN: (f64, f64) = (1.0, 10.0);

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into range space.
    ///
    /// A zero-width domain maps everything to the midpoint of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (x - d0) / denom * (r1 - r0)
    }

    /// Map a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (y - r0) / denom * (d1 - d0)
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Tick values of 1, 2 or 5 times a power of ten that fall within `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let mut out: Vec<f64> = (i1..=i2)
        .map(|i| {
            if inc < 0.0 {
                i as f64 / -inc
            } else {
                i as f64 * inc
            }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Returns `(first index, last index, increment)`. A negative increment means
/// ticks are `index / -increment`, which avoids float error for steps below 1.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50_f64.sqrt();
    let e5 = 10_f64.sqrt();
    let e2 = 2_f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        inc = 10_f64.powf(-power) / factor;
        i1 = (start * inc).round() as i64;
        i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        Some((i1, i2, -inc))
    } else {
        inc = 10_f64.powf(power) * factor;
        i1 = (start / inc).round() as i64;
        i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        Some((i1, i2, inc))
    }
}

/// A discrete band scale with no padding: `count` equal slots across the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self { count, range }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0).abs() / self.count as f64
    }

    /// Band width (equal to the step without padding).
    pub fn bandwidth(&self) -> f64 {
        self.step()
    }

    /// Start coordinate of the band at `index`.
    ///
    /// A reversed range places the first band at the end of the range.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        if r1 >= r0 {
            r0 + step * index as f64
        } else {
            r1 + step * (self.count.saturating_sub(1).saturating_sub(index)) as f64
        }
    }

    /// Center coordinate of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }

    /// Band containing coordinate `y`.
    pub fn index_at(&self, y: f64) -> Option<usize> {
        let step = self.step();
        if step == 0.0 || !y.is_finite() {
            return None;
        }
        let (r0, r1) = self.range;
        let lo = r0.min(r1);
        let slot = ((y - lo) / step).floor();
        if slot < 0.0 || slot >= self.count as f64 {
            return None;
        }
        let slot = slot as usize;
        if r1 >= r0 {
            Some(slot)
        } else {
            Some(self.count - 1 - slot)
        }
    }
}

/// The three coordinate mappings used by the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub year: LinearScale,
    pub month: BandScale,
    pub legend: LinearScale,
}

impl ChartScales {
    pub fn build(dataset: &TemperatureDataset, style: &ChartStyle) -> HeatmapResult<Self> {
        let (min_year, max_year) = dataset.year_extent().ok_or(HeatmapError::EmptyDataset)?;
        let width = f64::from(style.width);
        let height = f64::from(style.height);
        let padding = &style.padding;

        let year = LinearScale::new(
            (f64::from(min_year), f64::from(max_year)),
            (padding.left, width - padding.right),
        );
        let month = BandScale::new(
            Month::ALL.len(),
            (padding.top, height - padding.bottom),
        );
        let legend = LinearScale::new(
            LEGEND_DOMAIN,
            (
                padding.left,
                padding.left + style.palette.len() as f64 * style.swatch_size,
            ),
        );

        Ok(Self {
            year,
            month,
            legend,
        })
    }

    /// Pixel width of one year.
    pub fn cell_width(&self) -> f64 {
        self.year.map(2000.0) - self.year.map(1999.0)
    }

    /// Pixel height of one month band.
    pub fn cell_height(&self) -> f64 {
        self.month.position(Month::February.index()) - self.month.position(Month::January.index())
    }

    pub fn year_x(&self, year: i32) -> f64 {
        self.year.map(f64::from(year))
    }

    pub fn month_y(&self, month: Month) -> f64 {
        self.month.position(month.index())
    }
}
