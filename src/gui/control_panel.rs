//! Control Panel Widget
//! Left side panel with the data source, chart limits, and status reporting.

use crate::config::DashboardConfig;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings driving the derived views.
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    /// Municipalities shown in the rate chart.
    pub rate_chart_limit: usize,
    /// Entries in each top/bottom ranking chart.
    pub ranking_limit: usize,
}

/// Left side control panel with file selection and chart controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            settings: UserSettings {
                csv_path: None,
                rate_chart_limit: config.rate_chart_limit,
                ranking_limit: config.ranking_limit,
            },
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗺 Homiscope")
                    .size(22.0)
                    .color(Color32::from_rgb(165, 58, 147)),
            );
            ui.label(
                RichText::new("Municipal Homicide Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(5.0);
        ui.add_enabled_ui(self.settings.csv_path.is_some(), |ui| {
            if ui.small_button("⟳ Reload from disk").clicked() {
                action = ControlPanelAction::ReloadCsv;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Limits Section =====
        ui.label(RichText::new("⚙️ Chart Limits").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 130.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Rate chart:"));
            if ui
                .add(
                    egui::DragValue::new(&mut self.settings.rate_chart_limit)
                        .range(1..=200)
                        .suffix(" municipalities"),
                )
                .changed()
            {
                action = ControlPanelAction::LimitsChanged;
            }
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Rankings:"));
            if ui
                .add(
                    egui::DragValue::new(&mut self.settings.ranking_limit)
                        .range(1..=50)
                        .suffix(" entries"),
                )
                .changed()
            {
                action = ControlPanelAction::LimitsChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Summary CSV").size(14.0))
                    .min_size(egui::vec2(200.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSummary;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ReloadCsv,
    LimitsChanged,
    ExportSummary,
}
