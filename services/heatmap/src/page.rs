//! Standalone HTML page wrapping the chart SVG.
//!
//! The SVG sits inside `#chart-area`. An inline script drives hovering: entering
//! a cell outlines it and creates the single `#tooltip` at the pointer, moving
//! repositions it, leaving removes both. Tooltip text comes from each cell's
//! `data-tooltip` attribute, so the page works without the API.

use quick_xml::escape::escape;
use renderer::tooltip::{HIGHLIGHT_STROKE, HIGHLIGHT_STROKE_WIDTH, TOOLTIP_ID, TOOLTIP_TRANSFORM};
use renderer::HeatmapChart;

/// Element id of the chart container.
pub const CHART_AREA_ID: &str = "chart-area";

/// Hover handlers. `__STROKE__`, `__STROKE_WIDTH__` and `__TOOLTIP_ID__` are
/// filled in by `hover_script`.
const HOVER_SCRIPT: &str = r#"(function () {
  var tooltip = null;

  function place(event) {
    tooltip.style.left = event.pageX + "px";
    tooltip.style.top = event.pageY + "px";
  }

  document.querySelectorAll(".cell").forEach(function (cell) {
    cell.addEventListener("mouseenter", function (event) {
      cell.setAttribute("stroke", "__STROKE__");
      cell.setAttribute("stroke-width", "__STROKE_WIDTH__");
      if (tooltip) {
        tooltip.remove();
      }
      tooltip = document.createElement("div");
      tooltip.id = "__TOOLTIP_ID__";
      tooltip.setAttribute("data-year", cell.getAttribute("data-year"));
      tooltip.innerHTML = cell.getAttribute("data-tooltip");
      place(event);
      document.body.appendChild(tooltip);
    });

    cell.addEventListener("mousemove", function (event) {
      if (tooltip) {
        place(event);
      }
    });

    cell.addEventListener("mouseleave", function () {
      cell.removeAttribute("stroke");
      cell.removeAttribute("stroke-width");
      if (tooltip) {
        tooltip.remove();
        tooltip = null;
      }
    });
  });
})();"#;

fn hover_script() -> String {
    HOVER_SCRIPT
        .replace("__STROKE__", HIGHLIGHT_STROKE)
        .replace("__STROKE_WIDTH__", &HIGHLIGHT_STROKE_WIDTH.to_string())
        .replace("__TOOLTIP_ID__", TOOLTIP_ID)
}

/// Render a complete HTML document around `svg`.
pub fn render_page(chart: &HeatmapChart, svg: &str) -> String {
    let title = escape(chart.title.text.as_str());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: sans-serif; }}
#{area} {{ display: flex; justify-content: center; }}
#{tooltip} {{
  position: absolute;
  padding: 8px;
  background: rgba(0, 0, 0, 0.8);
  color: white;
  border-radius: 4px;
  text-align: center;
  pointer-events: none;
  transform: {transform};
}}
</style>
</head>
<body>
<div id="{area}">
{svg}
</div>
<script>
{script}
</script>
</body>
</html>
"#,
        title = title,
        area = CHART_AREA_ID,
        tooltip = TOOLTIP_ID,
        transform = TOOLTIP_TRANSFORM,
        svg = svg,
        script = hover_script(),
    )
}
