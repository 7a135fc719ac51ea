//! Dashboard Widget
//! Central scrollable panel with the fixed chart cards: rate by municipality,
//! top/bottom rankings by absolute count, and totals per department.

use crate::charts::{ChartPlotter, BOTTOM_COLOR, TOP_COLOR};
use crate::data::{sum_by_category, top_by, CategoryField, NumericField, Record, RecordSet};
use crate::stats::{clip_upper, summarize, FieldSummary};
use egui::{Color32, RichText, ScrollArea};
use std::sync::Arc;

const CARD_SPACING: f32 = 15.0;

/// Read-only views derived from one cleaned record set.
///
/// Rebuilt when a dataset loads or a chart limit changes; the underlying
/// records are never mutated.
pub struct DashboardData {
    pub records: Arc<RecordSet>,
    /// Municipalities sorted descending by rate, truncated for the rate chart.
    pub rate_ranking: Vec<Record>,
    /// Most homicides in absolute terms.
    pub top_municipalities: Vec<Record>,
    /// Fewest homicides in absolute terms.
    pub bottom_municipalities: Vec<Record>,
    /// Summed counts per department, sorted descending.
    pub department_totals: Vec<(String, f64)>,
    /// Upper clip of the rate color scale.
    pub rate_clip: f64,
    pub rate_summary: FieldSummary,
}

impl DashboardData {
    pub fn build(
        records: Arc<RecordSet>,
        rate_chart_limit: usize,
        ranking_limit: usize,
        clip_percentile: f64,
    ) -> Self {
        let all = &records.records;

        let rate_ranking = top_by(all, NumericField::HomicideRate, rate_chart_limit, false);
        let top_municipalities = top_by(all, NumericField::HomicideCount, ranking_limit, false);
        let bottom_municipalities = top_by(all, NumericField::HomicideCount, ranking_limit, true);

        let mut department_totals: Vec<(String, f64)> =
            sum_by_category(all, CategoryField::Department, NumericField::HomicideCount)
                .into_iter()
                .collect();
        department_totals
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let rate_clip = clip_upper(all, NumericField::HomicideRate, clip_percentile);
        let rate_summary = summarize(all, NumericField::HomicideRate);

        Self {
            records,
            rate_ranking,
            top_municipalities,
            bottom_municipalities,
            department_totals,
            rate_clip,
            rate_summary,
        }
    }
}

/// Scrollable chart display area.
#[derive(Default)]
pub struct Dashboard {
    pub data: Option<DashboardData>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    /// Draw the dashboard
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data — load a dataset to begin").size(20.0));
            });
            return;
        };

        if data.records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Dataset has no usable rows").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_summary_card(ui, data);
                ui.add_space(CARD_SPACING);

                Self::draw_card(ui, "Homicide rate by municipality (per 100,000)", |ui| {
                    ChartPlotter::draw_rate_chart(ui, &data.rate_ranking, data.rate_clip);
                });
                ui.add_space(CARD_SPACING);

                // Top and bottom rankings side by side
                let half_width = (ui.available_width() - CARD_SPACING) / 2.0;
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(half_width);
                        Self::draw_card(ui, "Municipalities with most homicides", |ui| {
                            ChartPlotter::draw_ranking_chart(
                                ui,
                                "top",
                                &data.top_municipalities,
                                TOP_COLOR,
                            );
                        });
                    });
                    ui.add_space(CARD_SPACING);
                    ui.vertical(|ui| {
                        ui.set_width(half_width);
                        Self::draw_card(ui, "Municipalities with fewest homicides", |ui| {
                            ChartPlotter::draw_ranking_chart(
                                ui,
                                "bottom",
                                &data.bottom_municipalities,
                                BOTTOM_COLOR,
                            );
                        });
                    });
                });
                ui.add_space(CARD_SPACING);

                Self::draw_card(ui, "Homicides by department", |ui| {
                    ChartPlotter::draw_department_chart(ui, &data.department_totals);
                });
                ui.add_space(CARD_SPACING);
            });
    }

    /// Header card with dataset-wide numbers.
    fn draw_summary_card(ui: &mut egui::Ui, data: &DashboardData) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let summary = &data.rate_summary;
                    Self::summary_value(ui, "Municipalities", format!("{}", summary.count));
                    Self::summary_value(ui, "Departments", format!("{}", data.department_totals.len()));
                    Self::summary_value(ui, "Mean rate", format!("{:.1}", summary.mean));
                    Self::summary_value(ui, "Max rate", format!("{:.1}", summary.max));
                    Self::summary_value(ui, "P95 rate", format!("{:.1}", summary.p95));
                    if data.records.dropped_rows() > 0 {
                        Self::summary_value(
                            ui,
                            "Rows dropped",
                            format!("{}", data.records.dropped_rows()),
                        );
                    }
                });
            });
    }

    fn summary_value(ui: &mut egui::Ui, label: &str, value: String) {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(18.0).strong());
        });
        ui.add_space(25.0);
    }

    /// Draw a single chart card with a title.
    fn draw_card(ui: &mut egui::Ui, title: &str, add_chart: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(165, 58, 147)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                add_chart(ui);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(municipality: &str, department: &str, count: f64, rate: f64) -> Record {
        Record {
            municipality: municipality.to_string(),
            department: department.to_string(),
            homicide_count: count,
            homicide_rate: rate,
        }
    }

    fn sample_set() -> Arc<RecordSet> {
        Arc::new(RecordSet {
            records: vec![
                record("Cali", "Valle", 1200.0, 53.2),
                record("Bogota", "Cundinamarca", 1100.0, 14.1),
                record("Medellin", "Antioquia", 900.0, 34.7),
                record("Palmira", "Valle", 180.0, 49.8),
                record("Envigado", "Antioquia", 20.0, 8.3),
            ],
            source_rows: 5,
        })
    }

    #[test]
    fn build_derives_all_views() {
        let data = DashboardData::build(sample_set(), 3, 2, 95.0);

        assert_eq!(data.rate_ranking.len(), 3);
        assert_eq!(data.rate_ranking[0].municipality, "Cali");

        assert_eq!(data.top_municipalities.len(), 2);
        assert_eq!(data.top_municipalities[0].municipality, "Cali");
        assert_eq!(data.bottom_municipalities[0].municipality, "Envigado");

        // Departments sorted descending by summed counts
        let departments: Vec<&str> = data
            .department_totals
            .iter()
            .map(|(d, _)| d.as_str())
            .collect();
        assert_eq!(departments, vec!["Valle", "Cundinamarca", "Antioquia"]);

        assert!(data.rate_clip <= data.rate_summary.max);
    }

    #[test]
    fn build_on_empty_set_is_empty_everywhere() {
        let data = DashboardData::build(Arc::new(RecordSet::default()), 30, 10, 95.0);
        assert!(data.rate_ranking.is_empty());
        assert!(data.top_municipalities.is_empty());
        assert!(data.department_totals.is_empty());
        assert!(data.rate_clip.is_nan());
    }

    #[test]
    fn build_does_not_mutate_the_record_set() {
        let set = sample_set();
        let before = (*set).clone();
        let _ = DashboardData::build(Arc::clone(&set), 30, 10, 95.0);
        assert_eq!(*set, before);
    }
}
