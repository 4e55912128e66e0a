//! Sales Dashboard Main Application
//! Window with export toolbar and the scrollable dashboard page.

use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DisplaySurface};
use crate::gui::export::export_charts;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::anyhow;
use eframe::egui;
use egui::TopBottomPanel;
use tracing::{error, info, warn};

const APP_NAME: &str = "Superstore Sales Dashboard";

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig, dashboard: Dashboard) -> Self {
        let source = config.data_path.display().to_string();
        let chart_count = dashboard.charts().count();
        Self {
            config,
            control_panel: ControlPanel::new(source, chart_count),
            chart_viewer: ChartViewer::new(dashboard),
        }
    }

    /// Render all charts to PNG in a folder chosen by the user.
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_directory(&self.config.export_dir)
            .pick_folder()
        else {
            return; // User cancelled
        };

        self.control_panel.set_progress(1.0, "Rendering charts...");
        let (width, height) = (self.config.export_width, self.config.export_height);
        let panel = &mut self.control_panel;
        let result = export_charts(self.chart_viewer.dashboard(), &dir, width, height, |done, total| {
            panel.set_progress(
                done as f32 / total as f32 * 100.0,
                &format!("Rendering chart {done}/{total}..."),
            );
        });

        match result {
            Ok(files) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} files to {}", files.len(), dir.display()),
                );
                self.control_panel.last_export = Some(dir);
            }
            Err(e) => {
                error!(error = %e, "chart export failed");
                self.control_panel.set_progress(0.0, &format!("Export error: {e}"));
            }
        }
    }

    fn handle_open_export_dir(&mut self) {
        let Some(dir) = &self.control_panel.last_export else {
            return;
        };
        if let Err(e) = open::that(dir) {
            warn!(error = %e, dir = %dir.display(), "could not open export folder");
            let message = format!("Could not open folder: {e}");
            self.control_panel.set_progress(0.0, &message);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("control_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            match self.control_panel.show(ui) {
                ControlPanelAction::ExportCharts => self.handle_export(),
                ControlPanelAction::OpenExportDir => self.handle_open_export_dir(),
                ControlPanelAction::None => {}
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Shows the dashboard in a native window; returns when the window closes.
pub struct WindowSurface {
    config: DashboardConfig,
}

impl WindowSurface {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }
}

impl DisplaySurface for WindowSurface {
    fn present(&mut self, dashboard: Dashboard) -> anyhow::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 900.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title(APP_NAME),
            ..Default::default()
        };

        info!(blocks = dashboard.len(), "opening dashboard window");
        let config = self.config.clone();
        eframe::run_native(
            APP_NAME,
            options,
            Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, dashboard)))),
        )
        .map_err(|e| anyhow!("window surface unavailable: {e}"))
    }
}
