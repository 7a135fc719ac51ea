//! Rate Summary Module
//! Descriptive numbers for the dashboard header and the color-scale clip.

use crate::data::{NumericField, Record};

/// Summary of one numeric field across the cleaned set.
#[derive(Debug, Clone)]
pub struct FieldSummary {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub p95: f64,
}

impl Default for FieldSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Compute count, mean, max, and p95 of `field` over `records`.
pub fn summarize(records: &[Record], field: NumericField) -> FieldSummary {
    let values: Vec<f64> = records.iter().map(|r| field.value(r)).collect();
    let n = values.len();
    if n == 0 {
        return FieldSummary::default();
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    FieldSummary {
        count: n,
        mean: values.iter().sum::<f64>() / n as f64,
        max: sorted[n - 1],
        p95: percentile(&sorted, 95.0),
    }
}

/// Upper clip value for a color scale: the `p`-th percentile of `field`.
/// Limiting the scale there keeps a few extreme municipalities from washing
/// out the contrast everywhere else.
pub fn clip_upper(records: &[Record], field: NumericField, p: f64) -> f64 {
    let mut sorted: Vec<f64> = records.iter().map(|r| field.value(r)).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile(&sorted, p)
}

/// Percentile with linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    // Out-of-range percentiles (e.g. from a hand-edited config) saturate
    // at the endpoints instead of indexing past the slice.
    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: f64) -> Record {
        Record {
            municipality: "M".to_string(),
            department: "D".to_string(),
            homicide_count: 0.0,
            homicide_rate: rate,
        }
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 40.0);
        assert_eq!(percentile(&sorted, 50.0), 25.0);
    }

    #[test]
    fn percentile_saturates_out_of_range() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 150.0), 4.0);
        assert_eq!(percentile(&sorted, -10.0), 1.0);
    }

    #[test]
    fn clip_tolerates_out_of_range_percentile() {
        let records = vec![record(1.0), record(2.0)];
        assert_eq!(clip_upper(&records, NumericField::HomicideRate, 150.0), 2.0);
    }

    #[test]
    fn percentile_of_singleton() {
        assert_eq!(percentile(&[7.5], 95.0), 7.5);
    }

    #[test]
    fn clip_sits_below_the_maximum() {
        let records: Vec<Record> = (1..=100).map(|i| record(i as f64)).collect();
        let clip = clip_upper(&records, NumericField::HomicideRate, 95.0);
        assert!(clip < 100.0);
        assert!(clip > 90.0);
    }

    #[test]
    fn summarize_empty_set() {
        let summary = summarize(&[], NumericField::HomicideRate);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
    }

    #[test]
    fn summarize_basic_values() {
        let records = vec![record(2.0), record(4.0), record(6.0)];
        let summary = summarize(&records, NumericField::HomicideRate);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.max, 6.0);
    }
}
