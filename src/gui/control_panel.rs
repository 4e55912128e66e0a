//! Control Panel Widget
//! Top toolbar with export controls and status line.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Actions that can be triggered from the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ExportCharts,
    OpenExportDir,
}

pub struct ControlPanel {
    pub source: String,
    pub chart_count: usize,
    pub progress: f32,
    pub status: String,
    pub last_export: Option<PathBuf>,
}

impl ControlPanel {
    pub fn new(source: String, chart_count: usize) -> Self {
        Self {
            source,
            chart_count,
            progress: 0.0,
            status: "Ready".to_string(),
            last_export: None,
        }
    }

    /// Set progress and status message
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    /// Draw the toolbar and return any triggered action
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.horizontal(|ui| {
            ui.label(RichText::new("📊 Sales Dashboard").size(16.0).strong());
            ui.separator();
            ui.label(
                RichText::new(format!("{} · {} charts", self.source, self.chart_count))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            ui.separator();

            if ui
                .add_enabled(self.chart_count > 0, egui::Button::new("🖼 Export PNG"))
                .on_hover_text("Render every chart to PNG and write charts.json")
                .clicked()
            {
                action = ControlPanelAction::ExportCharts;
            }

            if ui
                .add_enabled(self.last_export.is_some(), egui::Button::new("📂 Open folder"))
                .clicked()
            {
                action = ControlPanelAction::OpenExportDir;
            }

            ui.separator();
            if self.progress > 0.0 && self.progress < 100.0 {
                ui.add(
                    egui::ProgressBar::new(self.progress / 100.0)
                        .desired_width(120.0)
                        .show_percentage(),
                );
            }
            ui.label(RichText::new(&self.status).size(12.0));
        });

        action
    }
}
