//! Stats module - descriptive summaries

mod summary;

pub use summary::{clip_upper, summarize, FieldSummary};
