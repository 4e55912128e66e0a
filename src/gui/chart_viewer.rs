//! Chart Viewer Widget
//! Central scrollable page showing the dashboard blocks in order.

use crate::charts::{ChartPlotter, ChartSpec};
use crate::dashboard::{Block, Dashboard};
use crate::gui::markdown::show_markdown;
use egui::{RichText, ScrollArea};

/// Maximum width of the page column.
const PAGE_WIDTH: f32 = 1100.0;
const BLOCK_SPACING: f32 = 10.0;

/// Scrollable single-column page of text blocks and charts.
pub struct ChartViewer {
    dashboard: Dashboard,
}

impl ChartViewer {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.dashboard.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let width = ui.available_width().min(PAGE_WIDTH);
                ui.vertical(|ui| {
                    ui.set_max_width(width);
                    for block in self.dashboard.blocks() {
                        match block {
                            Block::Markdown(text) => show_markdown(ui, text),
                            Block::Chart(spec) => Self::draw_chart_card(ui, spec, width),
                        }
                        ui.add_space(BLOCK_SPACING);
                    }
                });
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, spec: &ChartSpec, width: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width - 24.0);
                ChartPlotter::draw_chart(ui, spec);
            });
    }
}
