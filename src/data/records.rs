//! Record Types & Pipeline Operations
//! Cleaned municipality records plus the pure aggregations the charts consume.

use std::collections::HashMap;

/// One cleaned municipality-year observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub municipality: String,
    pub department: String,
    /// Total absolute incidents.
    pub homicide_count: f64,
    /// Incidents per 100,000 inhabitants, precomputed upstream.
    pub homicide_rate: f64,
}

/// Immutable cleaned dataset. Records keep source file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<Record>,
    /// Row count before the silent data-quality filter, so the UI can
    /// report how many rows survived cleaning.
    pub source_rows: usize,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows discarded by cleaning (unparseable numerics, blank names).
    pub fn dropped_rows(&self) -> usize {
        self.source_rows.saturating_sub(self.records.len())
    }
}

/// Numeric field selector for sorting and summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    HomicideCount,
    HomicideRate,
}

impl NumericField {
    pub fn value(&self, record: &Record) -> f64 {
        match self {
            NumericField::HomicideCount => record.homicide_count,
            NumericField::HomicideRate => record.homicide_rate,
        }
    }
}

/// Category field selector for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    #[allow(dead_code)]
    Municipality,
    Department,
}

impl CategoryField {
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            CategoryField::Municipality => &record.municipality,
            CategoryField::Department => &record.department,
        }
    }
}

/// First `n` records sorted by `field` in the requested direction.
///
/// The sort is stable, so ties keep their source order. Returns fewer than
/// `n` entries when the set is smaller; `n == 0` yields an empty vec.
pub fn top_by(records: &[Record], field: NumericField, n: usize, ascending: bool) -> Vec<Record> {
    let mut sorted: Vec<Record> = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = field
            .value(a)
            .partial_cmp(&field.value(b))
            .unwrap_or(std::cmp::Ordering::Equal);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    sorted.truncate(n);
    sorted
}

/// Sum of `value` per distinct `category` value.
///
/// Every category present in the input appears exactly once in the output.
/// Ordering is unspecified; callers that need a display order sort afterward.
pub fn sum_by_category(
    records: &[Record],
    category: CategoryField,
    value: NumericField,
) -> HashMap<String, f64> {
    let mut sums: HashMap<String, f64> = HashMap::new();
    for record in records {
        *sums.entry(category.value(record).to_string()).or_insert(0.0) += value.value(record);
    }
    sums
}
