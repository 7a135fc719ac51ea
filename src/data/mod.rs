//! Data module - CSV loading, cleaning, and aggregation

mod cache;
mod loader;
mod records;

pub use cache::DatasetCache;
pub use loader::{load_and_clean, DatasetError};
pub use records::{sum_by_category, top_by, CategoryField, NumericField, Record, RecordSet};
