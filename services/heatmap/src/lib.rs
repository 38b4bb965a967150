//! Temperature variance heatmap service.
//!
//! Loads the monthly-variance dataset once, lays out the chart, and either
//! writes it to disk or serves it with hover tooltips over HTTP.

pub mod config;
pub mod loader;
pub mod page;
pub mod server;

pub use config::AppConfig;
pub use loader::{DatasetLoader, DatasetSource};
pub use server::{create_router, AppState};
