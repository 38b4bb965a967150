//! Tests for dataset loading from files and URLs.

use std::path::PathBuf;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use heatmap::loader::{DatasetLoader, DatasetSource};
use heatmap_common::HeatmapError;
use renderer::{build_chart, ChartStyle};
use test_utils::{
    assert_approx_eq, create_monthly_dataset, dataset_json, require_test_file, write_temp_file,
    FULL_DATASET_FILE, SCENARIO_JSON,
};

fn loader() -> DatasetLoader {
    DatasetLoader::new(Duration::from_secs(5)).unwrap()
}

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/sample.json")
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// ============================================================================
// File sources
// ============================================================================

#[tokio::test]
async fn test_load_from_file() {
    let dataset = loader()
        .load(&DatasetSource::Path(sample_path()))
        .await
        .unwrap();

    assert_eq!(dataset.len(), 24);
    assert_eq!(dataset.base_temperature, 8.66);
    assert_eq!(dataset.year_extent(), Some((1990, 1991)));
}

#[tokio::test]
async fn test_round_trips_generated_dataset() {
    let generated = create_monthly_dataset(1850, 1859, 8.66);
    let file = write_temp_file(&dataset_json(&generated));

    let dataset = loader()
        .load(&DatasetSource::Path(file.path().to_path_buf()))
        .await
        .unwrap();
    assert_eq!(dataset.len(), generated.len());
    for (loaded, expected) in dataset.monthly_variance.iter().zip(&generated.monthly_variance) {
        assert_eq!((loaded.year, loaded.month), (expected.year, expected.month));
        assert_approx_eq!(loaded.variance, expected.variance, 1e-12);
    }
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let result = loader()
        .load(&DatasetSource::parse("/nonexistent/global-temperature.json"))
        .await;
    assert!(matches!(result, Err(HeatmapError::Io(_))));
}

#[tokio::test]
async fn test_malformed_file_is_decode_error() {
    let file = write_temp_file(r#"{"baseTemperature": 8.66, "monthlyVariance": [{"year": "x"}]}"#);
    let result = loader()
        .load(&DatasetSource::Path(file.path().to_path_buf()))
        .await;
    assert!(matches!(result, Err(HeatmapError::Decode(_))));
}

#[tokio::test]
async fn test_empty_records_rejected() {
    let file = write_temp_file(r#"{"baseTemperature": 8.66, "monthlyVariance": []}"#);
    let result = loader()
        .load(&DatasetSource::Path(file.path().to_path_buf()))
        .await;
    assert!(matches!(result, Err(HeatmapError::EmptyDataset)));
}

#[tokio::test]
async fn test_full_reference_dataset() {
    let path = require_test_file!(FULL_DATASET_FILE);
    let dataset = loader().load(&DatasetSource::Path(path)).await.unwrap();

    assert_eq!(dataset.base_temperature, 8.66);
    assert_eq!(dataset.year_extent(), Some((1753, 2015)));

    // Every record lands in exactly one bin, so the chart builds completely.
    let chart = build_chart(&dataset, &ChartStyle::default()).unwrap();
    assert_eq!(chart.cells.len(), dataset.len());
}

// ============================================================================
// URL sources
// ============================================================================

#[tokio::test]
async fn test_load_from_url() {
    let base = spawn_server(Router::new().route(
        "/global-temperature.json",
        get(|| async { SCENARIO_JSON }),
    ))
    .await;

    let source = DatasetSource::parse(&format!("{}/global-temperature.json", base));
    let dataset = loader().load(&source).await.unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.year_extent(), Some((1753, 2015)));
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let base = spawn_server(Router::new().route(
        "/global-temperature.json",
        get(|| async { (StatusCode::NOT_FOUND, "gone") }),
    ))
    .await;

    let source = DatasetSource::parse(&format!("{}/global-temperature.json", base));
    let err = loader().load(&source).await.unwrap_err();
    assert!(matches!(err, HeatmapError::Fetch(_)));
    assert_eq!(err.http_status_code(), 502);
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_error() {
    // Port 1 on loopback refuses connections.
    let source = DatasetSource::parse("http://127.0.0.1:1/global-temperature.json");
    let result = loader().load(&source).await;
    assert!(matches!(result, Err(HeatmapError::Fetch(_))));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let base = spawn_server(Router::new().route("/data", get(|| async { "<html></html>" }))).await;

    let source = DatasetSource::parse(&format!("{}/data", base));
    let result = loader().load(&source).await;
    assert!(matches!(result, Err(HeatmapError::Decode(_))));
}
