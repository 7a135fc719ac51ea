//! Chart Plotter Module
//! Creates the dashboard bar charts using egui_plot.

use crate::data::Record;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Sequential ramp for rate-colored bars (pink to fuchsia to purple).
pub const RAMP: [Color32; 4] = [
    Color32::from_rgb(231, 207, 226), // #e7cfe2
    Color32::from_rgb(224, 129, 166), // #E081A6
    Color32::from_rgb(165, 58, 147),  // #a53a93
    Color32::from_rgb(238, 34, 238),  // #EE22EE
];

/// Base fill for the "most homicides" ranking chart.
pub const TOP_COLOR: Color32 = Color32::from_rgb(199, 21, 133);
/// Base fill for the "fewest homicides" ranking chart.
pub const BOTTOM_COLOR: Color32 = Color32::from_rgb(147, 112, 219);

const CHART_HEIGHT: f32 = 300.0;

/// Creates the fixed dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Map a value onto the sequential ramp, clipped at `clip`.
    ///
    /// Values at or above the clip all take the last ramp stop, matching
    /// the percentile-limited color scale of the map view.
    pub fn ramp_color(value: f64, clip: f64) -> Color32 {
        if !clip.is_finite() || clip <= 0.0 {
            return RAMP[0];
        }

        let t = (value / clip).clamp(0.0, 1.0);
        let segments = (RAMP.len() - 1) as f64;
        let position = t * segments;
        let idx = (position.floor() as usize).min(RAMP.len() - 2);
        let frac = (position - idx as f64) as f32;

        let lo = RAMP[idx];
        let hi = RAMP[idx + 1];
        Color32::from_rgb(
            (lo.r() as f32 + (hi.r() as f32 - lo.r() as f32) * frac) as u8,
            (lo.g() as f32 + (hi.g() as f32 - lo.g() as f32) * frac) as u8,
            (lo.b() as f32 + (hi.b() as f32 - lo.b() as f32) * frac) as u8,
        )
    }

    /// Vertical bars of homicide rate per municipality, fill from the ramp.
    /// `entries` arrive already sorted descending by rate.
    pub fn draw_rate_chart(ui: &mut egui::Ui, entries: &[Record], clip: f64) {
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, record)| {
                Bar::new(i as f64, record.homicide_rate)
                    .width(0.7)
                    .fill(Self::ramp_color(record.homicide_rate, clip))
                    .name(&record.municipality)
            })
            .collect();

        let labels: Vec<String> = entries.iter().map(|r| r.municipality.clone()).collect();

        Plot::new("rate_chart")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Municipality")
            .y_axis_label("Homicide rate (per 100,000)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= -0.5 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Horizontal bars of absolute homicide counts for a ranking card.
    /// Bars are shaded darker toward the top of the ranking.
    pub fn draw_ranking_chart(ui: &mut egui::Ui, id: &str, entries: &[Record], base: Color32) {
        let n = entries.len();
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, record)| {
                // First entry strongest, fading toward the last
                let fade = if n > 1 {
                    1.0 - 0.5 * (i as f32 / (n - 1) as f32)
                } else {
                    1.0
                };
                // Reverse the y positions so the first entry sits on top
                Bar::new((n - 1 - i) as f64, record.homicide_count)
                    .width(0.7)
                    .fill(base.gamma_multiply(fade))
                    .name(&record.municipality)
            })
            .collect();

        let labels: Vec<String> = entries
            .iter()
            .rev()
            .map(|r| r.municipality.clone())
            .collect();

        Plot::new(format!("ranking_{id}"))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Homicides")
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= -0.5 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Vertical bars of summed homicides per department.
    /// `totals` arrive already sorted descending by sum.
    pub fn draw_department_chart(ui: &mut egui::Ui, totals: &[(String, f64)]) {
        let max = totals.first().map(|(_, sum)| *sum).unwrap_or(0.0);

        let bars: Vec<Bar> = totals
            .iter()
            .enumerate()
            .map(|(i, (department, sum))| {
                Bar::new(i as f64, *sum)
                    .width(0.7)
                    .fill(Self::ramp_color(*sum, max))
                    .name(department)
            })
            .collect();

        let labels: Vec<String> = totals.iter().map(|(d, _)| d.clone()).collect();

        Plot::new("department_chart")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Department")
            .y_axis_label("Total homicides")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= -0.5 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
