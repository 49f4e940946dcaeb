//! Skycast — a small desktop weather dashboard.
//!
//! Pick or type a city, fetch its 5-day forecast, read it as text or as
//! a chart, and optionally have it read aloud.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod chart;
mod config;
mod dialog;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env();
    let window = egui::ViewportBuilder::default()
        .with_inner_size([config.window_width, config.window_height]);

    let app = app::DashboardApp::new(config)?;
    tracing::info!("Skycast started");

    eframe::run_native(
        "Weather Data Dashboard",
        eframe::NativeOptions {
            viewport: window,
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run UI: {e}"))?;

    Ok(())
}
