//! Stats module - descriptive statistics and null counting

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator};
