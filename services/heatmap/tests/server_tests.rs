//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use heatmap::server::{create_router, AppState};
use heatmap_common::HeatmapError;
use metrics_exporter_prometheus::PrometheusBuilder;
use renderer::ChartStyle;
use serde_json::Value;
use tower::ServiceExt;
use test_utils::{create_monthly_dataset, scenario_dataset};

fn scenario_router() -> Router {
    let state = AppState::new(scenario_dataset(), &ChartStyle::default()).unwrap();
    create_router(Arc::new(state))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// State
// ============================================================================

#[test]
fn test_state_rejects_uniform_temperatures() {
    let mut dataset = scenario_dataset();
    for record in &mut dataset.monthly_variance {
        record.variance = 0.0;
    }
    assert!(matches!(
        AppState::new(dataset, &ChartStyle::default()),
        Err(HeatmapError::InvalidBinRange { .. })
    ));
}

// ============================================================================
// Page and chart
// ============================================================================

#[tokio::test]
async fn test_index_page() {
    let (status, content_type, body) = get(scenario_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));

    let page = String::from_utf8(body).unwrap();
    assert!(page.contains(r#"<div id="chart-area">"#));
    assert!(page.contains(r#"id="plot-area""#));
    assert_eq!(page.matches(r#"class="cell""#).count(), 2);

    // Hover script and the text it shows.
    assert!(page.contains("<script>"));
    for event in ["mouseenter", "mousemove", "mouseleave"] {
        assert!(page.contains(&format!(r#"addEventListener("{}""#, event)));
    }
    assert!(page.contains(r#"tooltip.id = "tooltip";"#));
    assert!(page.contains("event.pageX"));
    assert!(page.contains("tooltip.remove()"));
    assert!(page.contains(
        r#"data-tooltip="2015 | December &lt;br&gt;Temperature: 10.0 C &lt;br&gt; Variance: +1.3""#
    ));
}

#[tokio::test]
async fn test_svg_without_hover() {
    let (status, content_type, body) = get(scenario_router(), "/chart.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));

    let svg = String::from_utf8(body).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(!svg.contains(r#"id="tooltip""#));
}

#[tokio::test]
async fn test_svg_hover_snapshot() {
    let (status, _, body) = get(scenario_router(), "/chart.svg?x=152&y=160").await;
    assert_eq!(status, StatusCode::OK);

    let svg = String::from_utf8(body).unwrap();
    assert!(svg.contains(r#"id="tooltip" data-year="1753""#));
    assert!(svg.contains("Variance: -6.2"));
}

#[tokio::test]
async fn test_svg_hover_miss_is_plain_chart() {
    let (status, _, body) = get(scenario_router(), "/chart.svg?x=5&y=5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!String::from_utf8(body).unwrap().contains(r#"id="tooltip""#));
}

#[tokio::test]
async fn test_png() {
    let style = ChartStyle {
        width: 400,
        height: 300,
        padding: renderer::Padding {
            left: 60.0,
            right: 10.0,
            top: 50.0,
            bottom: 100.0,
        },
        swatch_size: 10.0,
        ..ChartStyle::default()
    };
    let state = AppState::new(scenario_dataset(), &style).unwrap();
    let (status, content_type, body) = get(create_router(Arc::new(state)), "/chart.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(&body[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

// ============================================================================
// API
// ============================================================================

#[tokio::test]
async fn test_tooltip_hit() {
    let (status, json) = get_json(scenario_router(), "/api/tooltip?x=1476&y=570").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["cell"], 1);
    assert_eq!(json["date"], "December 2015");
    assert_eq!(json["fill"], "#ff3600");
    assert_eq!(json["tooltip"]["data_year"], 2015);
    assert_eq!(json["tooltip"]["position"]["x"], 1476.0);
    assert_eq!(
        json["html"],
        "2015 | December <br>Temperature: 10.0 C <br> Variance: +1.3"
    );
}

#[tokio::test]
async fn test_tooltip_miss_is_not_found() {
    let (status, json) = get_json(scenario_router(), "/api/tooltip?x=1&y=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("No cell"));
}

#[tokio::test]
async fn test_tooltip_requires_coordinates() {
    let (status, _, _) = get(scenario_router(), "/api/tooltip?x=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bins() {
    let (status, json) = get_json(scenario_router(), "/api/bins").await;
    assert_eq!(status, StatusCode::OK);

    let bins = json["bins"].as_array().unwrap();
    assert_eq!(bins.len(), 9);
    assert_eq!(bins[0]["color"], "#2596be");
    assert_eq!(bins[0]["lower_bound"], json["min"]);
    assert_eq!(bins[8]["upper_bound"], json["max"]);
}

#[tokio::test]
async fn test_health() {
    let dataset = create_monthly_dataset(1900, 1909, 8.66);
    let state = AppState::new(dataset, &ChartStyle::default()).unwrap();
    let (status, json) = get_json(create_router(Arc::new(state)), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["records"], 120);
    assert_eq!(json["cells"], 120);
}

// ============================================================================
// Metrics
// ============================================================================

#[tokio::test]
async fn test_metrics_without_recorder() {
    let (status, _, _) = get(scenario_router(), "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_with_handle() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let state = AppState::new(scenario_dataset(), &ChartStyle::default())
        .unwrap()
        .with_metrics(recorder.handle());
    let (status, content_type, _) = get(create_router(Arc::new(state)), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
}
