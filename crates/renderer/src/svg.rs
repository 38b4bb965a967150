//! SVG serialization of a `HeatmapChart`.
//!
//! Element ids and classes follow the page contract: `#chart`, `#title`,
//! `#description`, `#y-axis`, `#x-axis`, `#legend`, `#plot-area`, `.cell`, and
//! the transient `#tooltip`. Hover outlines come from an embedded CSS rule and
//! each cell carries a `<title>` with its tooltip text, so the SVG is
//! interactive without script.

use heatmap_common::{HeatmapError, HeatmapResult};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::axis::{Axis, AxisOrient, TICK_PADDING, TICK_SIZE};
use crate::chart::{HeatmapChart, TextElement};
use crate::tooltip::{
    HoverController, Tooltip, TooltipContent, HIGHLIGHT_STROKE, HIGHLIGHT_STROKE_WIDTH,
    TOOLTIP_OFFSET_Y,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const STYLESHEET: &str = "text { font-family: sans-serif; } \
.cell:hover { stroke: black; stroke-width: 2; }";

/// Tooltip box metrics for the static hover snapshot.
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;
const TOOLTIP_CHAR_WIDTH: f64 = 7.0;
const TOOLTIP_PADDING: f64 = 8.0;

/// Serialization switches.
#[derive(Debug, Clone, Copy)]
pub struct SvgOptions<'a> {
    /// Emit a `<title>` tooltip hint inside every cell.
    pub cell_titles: bool,
    /// Draw this hover state: outline on the hovered cell plus the tooltip box.
    pub hover: Option<&'a HoverController>,
}

impl Default for SvgOptions<'_> {
    fn default() -> Self {
        Self {
            cell_titles: true,
            hover: None,
        }
    }
}

impl<'a> SvgOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hover(mut self, hover: &'a HoverController) -> Self {
        self.hover = Some(hover);
        self
    }

    pub fn without_cell_titles(mut self) -> Self {
        self.cell_titles = false;
        self
    }
}

impl HeatmapChart {
    /// Serialize with default options.
    pub fn to_svg(&self) -> HeatmapResult<String> {
        self.to_svg_with(&SvgOptions::default())
    }

    /// Serialize with explicit options.
    pub fn to_svg_with(&self, options: &SvgOptions<'_>) -> HeatmapResult<String> {
        let mut svg = SvgWriter::new();
        let width = self.width.to_string();
        let height = self.height.to_string();

        svg.start(
            "svg",
            &[
                ("xmlns", SVG_NS.to_string()),
                ("id", "chart".to_string()),
                ("width", width.clone()),
                ("height", height.clone()),
                ("viewBox", format!("0 0 {} {}", width, height)),
            ],
        )?;

        svg.start("style", &[])?;
        svg.text(STYLESHEET)?;
        svg.end("style")?;

        svg.empty(
            "rect",
            &[
                ("width", width),
                ("height", height),
                ("fill", "white".to_string()),
            ],
        )?;

        self.write_title(&mut svg)?;
        write_axis(&mut svg, &self.y_axis)?;
        write_text_group(&mut svg, "y-axis-label", &self.y_axis_label)?;
        write_axis(&mut svg, &self.x_axis)?;
        write_text_group(&mut svg, "x-axis-label", &self.x_axis_label)?;
        self.write_legend(&mut svg)?;
        self.write_cells(&mut svg, options)?;

        if let Some(tooltip) = options.hover.and_then(HoverController::tooltip) {
            write_tooltip(&mut svg, tooltip)?;
        }

        svg.end("svg")?;
        svg.finish()
    }

    fn write_title(&self, svg: &mut SvgWriter) -> HeatmapResult<()> {
        let title = &self.title;
        svg.start(
            "g",
            &[
                ("id", "title".to_string()),
                ("transform", translate(title.x, title.y)),
            ],
        )?;
        write_text(svg, &self.title, 0.0, 0.0)?;

        svg.start("g", &[("id", "description".to_string())])?;
        write_text(
            svg,
            &self.description,
            self.description.x - title.x,
            self.description.y - title.y,
        )?;
        svg.end("g")?;

        svg.end("g")
    }

    fn write_legend(&self, svg: &mut SvgWriter) -> HeatmapResult<()> {
        svg.start(
            "g",
            &[
                ("id", "legend".to_string()),
                ("transform", translate(0.0, self.legend.translate_y)),
            ],
        )?;

        for swatch in &self.legend.swatches {
            svg.empty(
                "rect",
                &[
                    ("x", num(swatch.x)),
                    ("y", num(swatch.y)),
                    ("width", num(swatch.size)),
                    ("height", num(swatch.size)),
                    ("fill", swatch.color.clone()),
                    ("stroke", "black".to_string()),
                ],
            )?;
        }
        write_axis(svg, &self.legend.axis)?;

        svg.end("g")
    }

    fn write_cells(&self, svg: &mut SvgWriter, options: &SvgOptions<'_>) -> HeatmapResult<()> {
        svg.start("g", &[("id", "plot-area".to_string())])?;

        for (index, cell) in self.cells.iter().enumerate() {
            let mut attrs = vec![
                ("class", "cell".to_string()),
                ("data-month", cell.month.index().to_string()),
                ("data-year", cell.year.to_string()),
                ("data-temp", cell.temperature.to_string()),
                ("data-variance", cell.variance.to_string()),
                ("data-tooltip", TooltipContent::from_cell(cell).to_html()),
                ("date", cell.date_label()),
                ("x", num(cell.x)),
                ("y", num(cell.y)),
                ("width", num(cell.width)),
                ("height", num(cell.height)),
                ("fill", cell.fill.clone()),
            ];
            if options.hover.is_some_and(|h| h.is_highlighted(index)) {
                attrs.push(("stroke", HIGHLIGHT_STROKE.to_string()));
                attrs.push(("stroke-width", num(HIGHLIGHT_STROKE_WIDTH)));
            }

            if options.cell_titles {
                svg.start("rect", &attrs)?;
                svg.start("title", &[])?;
                svg.text(&TooltipContent::from_cell(cell).to_text())?;
                svg.end("title")?;
                svg.end("rect")?;
            } else {
                svg.empty("rect", &attrs)?;
            }
        }

        svg.end("g")
    }
}

fn write_axis(svg: &mut SvgWriter, axis: &Axis) -> HeatmapResult<()> {
    let anchor = match axis.orient {
        AxisOrient::Left => "end",
        AxisOrient::Bottom => "middle",
    };
    let mut attrs = Vec::with_capacity(4);
    if let Some(id) = &axis.id {
        attrs.push(("id", id.clone()));
    }
    attrs.push(("transform", translate(axis.translate.0, axis.translate.1)));
    attrs.push(("font-size", "10".to_string()));
    attrs.push(("text-anchor", anchor.to_string()));
    svg.start("g", &attrs)?;

    svg.empty(
        "path",
        &[
            ("class", "domain".to_string()),
            ("fill", "none".to_string()),
            ("stroke", "black".to_string()),
            ("d", axis.domain_path()),
        ],
    )?;

    for tick in &axis.ticks {
        let (transform, line_attr, text_pos, dy) = match axis.orient {
            AxisOrient::Left => (
                translate(0.0, tick.offset),
                ("x2", num(-TICK_SIZE)),
                ("x", num(-(TICK_SIZE + TICK_PADDING))),
                "0.32em",
            ),
            AxisOrient::Bottom => (
                translate(tick.offset, 0.0),
                ("y2", num(TICK_SIZE)),
                ("y", num(TICK_SIZE + TICK_PADDING)),
                "0.71em",
            ),
        };

        svg.start(
            "g",
            &[("class", "tick".to_string()), ("transform", transform)],
        )?;
        svg.empty("line", &[("stroke", "black".to_string()), line_attr])?;
        svg.start(
            "text",
            &[
                ("fill", "black".to_string()),
                text_pos,
                ("dy", dy.to_string()),
            ],
        )?;
        svg.text(&tick.label)?;
        svg.end("text")?;
        svg.end("g")?;
    }

    svg.end("g")
}

fn write_text_group(svg: &mut SvgWriter, id: &str, text: &TextElement) -> HeatmapResult<()> {
    svg.start("g", &[("id", id.to_string())])?;
    write_text(svg, text, text.x, text.y)?;
    svg.end("g")
}

fn write_text(svg: &mut SvgWriter, text: &TextElement, x: f64, y: f64) -> HeatmapResult<()> {
    let mut transform = translate(x, y);
    if text.rotate != 0.0 {
        transform.push_str(&format!(" rotate({})", num(text.rotate)));
    }

    let mut attrs = vec![
        ("transform", transform),
        ("text-anchor", "middle".to_string()),
    ];
    if let Some(size) = text.font_size {
        attrs.push(("font-size", size.to_string()));
    }

    svg.start("text", &attrs)?;
    svg.text(&text.text)?;
    svg.end("text")
}

/// Box centered above the pointer, its bottom edge `TOOLTIP_OFFSET_Y` above it.
fn write_tooltip(svg: &mut SvgWriter, tooltip: &Tooltip) -> HeatmapResult<()> {
    let lines = tooltip.content.lines();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = longest as f64 * TOOLTIP_CHAR_WIDTH + 2.0 * TOOLTIP_PADDING;
    let box_height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + 2.0 * TOOLTIP_PADDING;
    let left = tooltip.position.x - box_width / 2.0;
    let top = tooltip.position.y - TOOLTIP_OFFSET_Y - box_height;

    svg.start(
        "g",
        &[
            ("id", tooltip.id().to_string()),
            ("data-year", tooltip.data_year.to_string()),
            ("transform", translate(left, top)),
        ],
    )?;
    svg.empty(
        "rect",
        &[
            ("width", num(box_width)),
            ("height", num(box_height)),
            ("rx", "4".to_string()),
            ("fill", "black".to_string()),
            ("fill-opacity", "0.8".to_string()),
        ],
    )?;
    svg.start(
        "text",
        &[
            ("fill", "white".to_string()),
            ("font-size", "12".to_string()),
            ("text-anchor", "middle".to_string()),
        ],
    )?;
    for (i, line) in lines.iter().enumerate() {
        svg.start(
            "tspan",
            &[
                ("x", num(box_width / 2.0)),
                (
                    "y",
                    num(TOOLTIP_PADDING + (i as f64 + 0.75) * TOOLTIP_LINE_HEIGHT),
                ),
            ],
        )?;
        svg.text(line)?;
        svg.end("tspan")?;
    }
    svg.end("text")?;

    svg.end("g")
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({}, {})", num(x), num(y))
}

/// Coordinates rounded to 1/1000 px, without trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Thin wrapper mapping quick-xml failures into `HeatmapError::Render`.
struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> HeatmapResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| HeatmapError::Render(format!("SVG write failed: {}", e)))
    }

    fn element<'a>(name: &'a str, attrs: &'a [(&'a str, String)]) -> BytesStart<'a> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, value.as_str()));
        }
        element
    }

    fn start(&mut self, name: &str, attrs: &[(&str, String)]) -> HeatmapResult<()> {
        self.write(Event::Start(Self::element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) -> HeatmapResult<()> {
        self.write(Event::Empty(Self::element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> HeatmapResult<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> HeatmapResult<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn finish(self) -> HeatmapResult<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| HeatmapError::Render(format!("SVG is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_trims_noise() {
        assert_eq!(num(5.057251908396947), "5.057");
        assert_eq!(num(150.0), "150");
        assert_eq!(num(-0.0001), "0");
    }
}
