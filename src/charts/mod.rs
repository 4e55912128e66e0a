//! Charts module - Chart specifications and rendering

mod color;
mod factory;
mod format;
mod plotter;
mod renderer;
mod spec;

pub use factory::ChartFactory;
pub use format::{format_percent, format_thousands, format_usd};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{ChartKind, ChartSpec, SeriesData};
