//! Homiscope Main Application
//! Main window with control panel and dashboard.

use crate::config::DashboardConfig;
use crate::data::{load_and_clean, DatasetCache, RecordSet};
use crate::gui::dashboard::DashboardData;
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use egui::SidePanel;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { path: PathBuf, set: RecordSet },
    Error(String),
}

/// Main application window.
pub struct HomiscopeApp {
    config: DashboardConfig,
    cache: DatasetCache,
    control_panel: ControlPanel,
    dashboard: Dashboard,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl HomiscopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = DashboardConfig::load_or_default();
        let control_panel = ControlPanel::new(&config);
        Self {
            config,
            cache: DatasetCache::new(),
            control_panel,
            dashboard: Dashboard::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.csv_path = Some(path.clone());

            // Same source in the same session: reuse the cleaned set.
            if let Some(set) = self.cache.get(&path) {
                self.rebuild_dashboard(set);
                return;
            }

            self.start_load(path);
        }
    }

    /// Re-parse the current source, dropping its cache entry first.
    fn handle_reload_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = self.control_panel.settings.csv_path.clone() {
            self.cache.invalidate(&path);
            self.start_load(path);
        }
    }

    /// Parse and clean the CSV on a background thread.
    fn start_load(&mut self, path: PathBuf) {
        self.dashboard.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(0.0, "Loading dataset...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match load_and_clean(&path) {
                Ok(set) => {
                    let _ = tx.send(LoadResult::Complete { path, set });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(30.0, &status);
                    }
                    LoadResult::Complete { path, set } => {
                        let set = self.cache.insert(path, set);
                        self.rebuild_dashboard(set);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Derive the chart views from the cleaned set and current limits.
    fn rebuild_dashboard(&mut self, set: Arc<RecordSet>) {
        let settings = &self.control_panel.settings;
        let data = DashboardData::build(
            Arc::clone(&set),
            settings.rate_chart_limit,
            settings.ranking_limit,
            self.config.clip_percentile,
        );
        self.dashboard.set_data(data);
        self.control_panel.export_enabled = !set.is_empty();
        self.control_panel.set_progress(
            100.0,
            &format!(
                "Loaded {} of {} rows ({} dropped)",
                set.len(),
                set.source_rows,
                set.dropped_rows()
            ),
        );
    }

    /// Chart limits changed: re-derive views from the cached set.
    fn handle_limits_changed(&mut self) {
        if let Some(path) = self.control_panel.settings.csv_path.clone() {
            if let Some(set) = self.cache.get(&path) {
                self.rebuild_dashboard(set);
            }
        }
    }

    /// Write the per-department totals to a CSV chosen by the user.
    fn handle_export_summary(&mut self) {
        let Some(data) = &self.dashboard.data else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("department_totals.csv")
            .save_file()
        else {
            return; // User cancelled
        };

        match Self::write_department_csv(&data.department_totals, &output_path) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} departments", data.department_totals.len()),
                );
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: export failed: {}", e));
            }
        }
    }

    fn write_department_csv(totals: &[(String, f64)], path: &Path) -> anyhow::Result<()> {
        let departments: Vec<String> = totals.iter().map(|(d, _)| d.clone()).collect();
        let sums: Vec<f64> = totals.iter().map(|(_, s)| *s).collect();

        let mut df = DataFrame::new(vec![
            Column::new("department".into(), departments),
            Column::new("total_homicides".into(), sums),
        ])?;

        let mut file = std::fs::File::create(path)?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        Ok(())
    }
}

impl eframe::App for HomiscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ReloadCsv => self.handle_reload_csv(),
                        ControlPanelAction::LimitsChanged => self.handle_limits_changed(),
                        ControlPanelAction::ExportSummary => self.handle_export_summary(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
