//! HTTP server for the interactive heatmap.
//!
//! Provides endpoints for:
//! - The HTML page with the inline chart
//! - The chart as SVG (optionally with a hover snapshot) and PNG
//! - Tooltip lookup for a point in chart coordinates
//! - Color bins, health and Prometheus metrics

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use heatmap_common::{HeatmapError, HeatmapResult, TemperatureDataset};
use metrics::counter;
use metrics_exporter_prometheus::PrometheusHandle;
use renderer::{
    build_chart_with_bins, png::render_png, ChartStyle, ColorBins, HeatmapChart, HoverController,
    PagePoint, SvgOptions, Tooltip, TooltipContent,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::page::render_page;

// ============================================================================
// Shared State
// ============================================================================

/// Everything derived from the dataset at start-up. Immutable afterwards.
pub struct AppState {
    pub dataset: TemperatureDataset,
    pub bins: ColorBins,
    pub chart: HeatmapChart,
    /// The chart serialized once without hover state.
    pub svg: String,
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Bin, lay out and serialize the chart for `dataset`.
    pub fn new(dataset: TemperatureDataset, style: &ChartStyle) -> HeatmapResult<Self> {
        style.validate()?;
        dataset.validate()?;

        let bins = ColorBins::from_dataset(&dataset, &style.palette)?;
        let chart = build_chart_with_bins(&dataset, style, &bins)?;
        let svg = chart.to_svg()?;

        info!(
            cells = chart.cells.len(),
            min_temperature = bins.min(),
            max_temperature = bins.max(),
            "Chart ready"
        );

        Ok(Self {
            dataset,
            bins,
            chart,
            svg,
            prometheus: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Optional pointer position for a hover snapshot.
#[derive(Debug, Deserialize)]
pub struct HoverQuery {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Point in chart coordinates.
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub x: f64,
    pub y: f64,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TooltipResponse {
    /// Index of the hovered cell in dataset order.
    pub cell: usize,
    pub date: String,
    pub fill: String,
    pub tooltip: Tooltip,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
    pub cells: usize,
}

// ============================================================================
// Router
// ============================================================================

/// Create the heatmap router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/chart.svg", get(svg_handler))
        .route("/chart.png", get(png_handler))
        .route("/api/tooltip", get(tooltip_handler))
        .route("/api/bins", get(bins_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(Extension(state))
}

/// Run the HTTP server until it fails.
pub async fn run_server(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    info!(port = port, "Starting heatmap server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - HTML page with the inline chart
async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    counter!("heatmap_renders_total", "format" => "html").increment(1);
    Html(render_page(&state.chart, &state.svg))
}

/// GET /chart.svg - Chart SVG, with a hover snapshot when `x` and `y` hit a cell
async fn svg_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HoverQuery>,
) -> Response {
    counter!("heatmap_renders_total", "format" => "svg").increment(1);

    let hovered = match (params.x, params.y) {
        (Some(x), Some(y)) => state.chart.hit_test(x, y).map(|index| (index, x, y)),
        _ => None,
    };

    let body = match hovered {
        Some((index, x, y)) => {
            let mut hover = HoverController::new();
            hover.pointer_enter(index, &state.chart.cells[index], PagePoint::new(x, y));
            match state
                .chart
                .to_svg_with(&SvgOptions::new().with_hover(&hover))
            {
                Ok(svg) => svg,
                Err(e) => return error_response(&e),
            }
        }
        None => state.svg.clone(),
    };

    ([(header::CONTENT_TYPE, "image/svg+xml")], body).into_response()
}

/// GET /chart.png - Rasterized chart
async fn png_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    counter!("heatmap_renders_total", "format" => "png").increment(1);

    let rendered = tokio::task::spawn_blocking(move || render_png(&state.chart)).await;
    match rendered {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => error_response(&HeatmapError::Render(format!("Render task failed: {}", e))),
    }
}

/// GET /api/tooltip?x=&y= - Tooltip for the cell under a chart point
async fn tooltip_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(point): Query<PointQuery>,
) -> Response {
    counter!("heatmap_tooltip_queries_total").increment(1);

    let Some(index) = state.chart.hit_test(point.x, point.y) else {
        return error_response(&HeatmapError::NoCellAt {
            x: point.x,
            y: point.y,
        });
    };
    let cell = &state.chart.cells[index];

    let tooltip = Tooltip {
        data_year: cell.year,
        position: PagePoint::new(point.x, point.y),
        content: TooltipContent::from_cell(cell),
    };

    Json(TooltipResponse {
        cell: index,
        date: cell.date_label(),
        fill: cell.fill.clone(),
        html: tooltip.content.to_html(),
        tooltip,
    })
    .into_response()
}

/// GET /api/bins - Color bins cut from the observed temperature range
async fn bins_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.bins.clone())
}

/// GET /health - Health check
async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        records: state.dataset.len(),
        cells: state.chart.cells.len(),
    })
}

/// GET /metrics - Prometheus metrics
async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.prometheus {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}

fn error_response(err: &HeatmapError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
