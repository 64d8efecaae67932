//! Analysis Configuration
//! All knobs for a run live here; there are no CLI flags or env vars.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one analysis run. `Default` carries the values the
/// tool ships with; tests construct their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Input CSV file.
    pub file_path: PathBuf,
    /// Sales values outside this closed range are excluded from the
    /// sales distribution chart (chart-local, the table keeps them).
    pub sales_range: (f64, f64),
    /// Same, for the profit distribution chart.
    pub profit_range: (f64, f64),
    /// Number of histogram bins for both distribution charts.
    pub bin_count: usize,
    /// Directory chart PNGs are written to.
    pub chart_dir: PathBuf,
    /// Hand each rendered chart to the system default viewer.
    pub open_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("sample-300-rows.csv"),
            sales_range: (0.0, 2000.0),
            profit_range: (-500.0, 500.0),
            bin_count: 50,
            chart_dir: PathBuf::from("charts"),
            open_charts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_literals() {
        let config = AnalysisConfig::default();
        assert_eq!(config.file_path, PathBuf::from("sample-300-rows.csv"));
        assert_eq!(config.sales_range, (0.0, 2000.0));
        assert_eq!(config.profit_range, (-500.0, 500.0));
        assert_eq!(config.bin_count, 50);
    }
}
