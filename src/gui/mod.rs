//! GUI module - Window display surface

mod app;
mod chart_viewer;
mod control_panel;
mod export;
mod markdown;

pub use app::WindowSurface;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
