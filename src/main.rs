//! Superstore Sales Dashboard
//!
//! Loads the order CSV, aggregates it with Polars and shows the results as a
//! page of narrative text and charts, either in a window or on the terminal.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod logging;
mod pipeline;
mod stats;

use anyhow::Context;
use config::{DashboardConfig, SurfaceKind};
use dashboard::{DisplaySurface, TerminalSurface};
use gui::WindowSurface;
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = DashboardConfig::from_env().context("configuration")?;
    info!(
        data = %config.data_path.display(),
        surface = ?config.surface,
        "starting sales dashboard"
    );

    let dashboard = pipeline::build_dashboard(&config.data_path)?;

    let mut surface: Box<dyn DisplaySurface> = match config.surface {
        SurfaceKind::Window => Box::new(WindowSurface::new(config.clone())),
        SurfaceKind::Terminal => Box::new(TerminalSurface::stdout()),
    };
    surface.present(dashboard).context("display surface")?;
    Ok(())
}
