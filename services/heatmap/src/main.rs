//! Temperature variance heatmap.
//!
//! Loads the monthly-variance dataset once, then either:
//! - `render`: writes the chart as SVG (and optionally PNG / HTML)
//! - `serve`: serves the interactive page and tooltip API over HTTP

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap::config::AppConfig;
use heatmap::loader::{DatasetLoader, DatasetSource};
use heatmap::page::render_page;
use heatmap::server::{run_server, AppState};
use renderer::png::render_png;

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Monthly global land-surface temperature heatmap")]
struct Args {
    /// Dataset URL or file path (overrides the config file)
    #[arg(long, global = true, env = "HEATMAP_DATA")]
    data: Option<String>,

    /// YAML configuration file
    #[arg(long, global = true, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to files and exit
    Render {
        /// SVG output path
        #[arg(long, default_value = "chart.svg")]
        out: PathBuf,

        /// Also write a PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Also write a standalone HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Serve the interactive chart
    Serve {
        /// Port for the HTTP server
        #[arg(long, env = "HEATMAP_PORT", default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = run(args).await {
        error!(error = %format!("{:#}", e), "Heatmap failed");
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let source = DatasetSource::parse(args.data.as_deref().unwrap_or(config.data_source.as_str()));

    info!(source = %source, "Starting temperature heatmap");

    let loader = DatasetLoader::new(config.request_timeout())?;
    let dataset = loader
        .load(&source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))?;

    match args.command {
        Command::Render { out, png, html } => {
            let state = AppState::new(dataset, &config.style)?;

            tokio::fs::write(&out, &state.svg)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(path = %out.display(), "Wrote SVG");

            if let Some(path) = png {
                let bytes = render_png(&state.chart)?;
                tokio::fs::write(&path, bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Wrote PNG");
            }

            if let Some(path) = html {
                tokio::fs::write(&path, render_page(&state.chart, &state.svg))
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Wrote HTML page");
            }
        }
        Command::Serve { port } => {
            // Initialize Prometheus metrics exporter
            let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .context("Failed to install Prometheus recorder")?;
            info!("Prometheus metrics exporter initialized");

            let state = AppState::new(dataset, &config.style)?.with_metrics(prometheus_handle);
            run_server(Arc::new(state), port).await?;
        }
    }

    Ok(())
}
