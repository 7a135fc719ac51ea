//! Homiscope - Municipal Homicide Data Dashboard
//!
//! Loads a municipal homicide CSV, cleans it, and renders bar charts of
//! counts and rates by municipality and department.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::HomiscopeApp;

fn main() -> eframe::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Homiscope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Homiscope",
        options,
        Box::new(|cc| Ok(Box::new(HomiscopeApp::new(cc)))),
    )
}
