//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartPlotter, BOTTOM_COLOR, TOP_COLOR};
