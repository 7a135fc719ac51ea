//! CSV Dataset Loader Module
//! Loads the municipal homicide CSV with Polars and cleans it into a RecordSet.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::records::{Record, RecordSet};

/// Source headers, exact match (case and spacing sensitive).
pub const MUNICIPALITY_COL: &str = "MUNICIPIO";
pub const DEPARTMENT_COL: &str = "DEPARTAMENTO";
pub const COUNT_COL: &str = "HOMICIDIO TOTAL";
pub const RATE_COL: &str = "TASA MUNICIPAL";

const REQUIRED_COLUMNS: [&str; 4] = [MUNICIPALITY_COL, DEPARTMENT_COL, COUNT_COL, RATE_COL];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Load the CSV at `path` and clean it into an ordered `RecordSet`.
///
/// Rows where either numeric field fails to parse or is negative, or
/// where a name is blank, are dropped silently; the reduced count stays
/// visible through `RecordSet::dropped_rows`. Extra columns are tolerated
/// and ignored.
pub fn load_and_clean(path: &Path) -> Result<RecordSet, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::SourceNotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    clean(&df)
}

/// Schema normalization, numeric coercion, and row filtering.
pub fn clean(df: &DataFrame) -> Result<RecordSet, DatasetError> {
    for col_name in REQUIRED_COLUMNS {
        if df.column(col_name).is_err() {
            return Err(DatasetError::MissingColumn(col_name));
        }
    }

    let municipality = df.column(MUNICIPALITY_COL)?.cast(&DataType::String)?;
    let municipality = municipality.str()?;
    let department = df.column(DEPARTMENT_COL)?.cast(&DataType::String)?;
    let department = department.str()?;
    // Non-strict casts: unparseable values become null instead of failing.
    let count = df.column(COUNT_COL)?.cast(&DataType::Float64)?;
    let count = count.f64()?;
    let rate = df.column(RATE_COL)?.cast(&DataType::Float64)?;
    let rate = rate.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(m), Some(d), Some(c), Some(r)) = (
            municipality.get(i),
            department.get(i),
            count.get(i),
            rate.get(i),
        ) {
            // Counts and rates are non-negative by definition
            if m.is_empty() || d.is_empty() || c.is_nan() || r.is_nan() || c < 0.0 || r < 0.0 {
                continue;
            }
            records.push(Record {
                municipality: m.to_string(),
                department: d.to_string(),
                homicide_count: c,
                homicide_rate: r,
            });
        }
    }

    Ok(RecordSet {
        records,
        source_rows: df.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{sum_by_category, top_by, CategoryField, NumericField};
    use std::io::Write;

    const HEADER: &str = "MUNICIPIO,DEPARTAMENTO,HOMICIDIO TOTAL,TASA MUNICIPAL";

    fn write_csv(header: &str, rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{header}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn unparseable_numerics_drop_the_row() {
        let file = write_csv(
            HEADER,
            &[
                "A,X,10,5.0",
                "B,X,abc,3.0",
                "C,Y,7,2.0",
            ],
        );

        let set = load_and_clean(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.source_rows, 3);
        assert_eq!(set.dropped_rows(), 1);

        let names: Vec<&str> = set.records.iter().map(|r| r.municipality.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(set.records[0].homicide_count, 10.0);
        assert_eq!(set.records[0].homicide_rate, 5.0);
    }

    #[test]
    fn negative_numerics_drop_the_row() {
        let file = write_csv(
            HEADER,
            &[
                "A,X,-3,5.0",
                "B,X,4,-1.0",
                "C,Y,7,2.0",
            ],
        );

        let set = load_and_clean(file.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].municipality, "C");
        assert_eq!(set.dropped_rows(), 2);
    }

    #[test]
    fn end_to_end_aggregates() {
        let file = write_csv(
            HEADER,
            &[
                "A,X,10,5.0",
                "B,X,abc,3.0",
                "C,Y,7,2.0",
            ],
        );

        let set = load_and_clean(file.path()).unwrap();

        let sums = sum_by_category(&set.records, CategoryField::Department, NumericField::HomicideCount);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums["X"], 10.0);
        assert_eq!(sums["Y"], 7.0);

        let top = top_by(&set.records, NumericField::HomicideCount, 1, false);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].municipality, "A");
    }

    #[test]
    fn load_is_idempotent() {
        let file = write_csv(HEADER, &["A,X,10,5.0", "C,Y,7,2.0"]);

        let first = load_and_clean(file.path()).unwrap();
        let second = load_and_clean(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn headers_only_yields_empty_set() {
        let file = write_csv(HEADER, &[]);

        let set = load_and_clean(file.path()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.source_rows, 0);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv("MUNICIPIO,DEPARTAMENTO,HOMICIDIO TOTAL", &["A,X,10"]);

        match load_and_clean(file.path()) {
            Err(DatasetError::MissingColumn(col)) => assert_eq!(col, RATE_COL),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let result = load_and_clean(Path::new("/no/such/dataset.csv"));
        assert!(matches!(result, Err(DatasetError::SourceNotFound(_))));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_csv(
            "MUNICIPIO,DEPARTAMENTO,HOMICIDIO TOTAL,TASA MUNICIPAL,CODIGO DANE",
            &["A,X,10,5.0,76001"],
        );

        let set = load_and_clean(file.path()).unwrap();
        assert_eq!(set.len(), 1);
    }
}
