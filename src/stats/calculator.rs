//! Statistics Calculator Module
//! Descriptive statistics over numeric columns plus per-column null counts.
//! Pure reads; nothing downstream consumes the output.

use polars::prelude::*;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations over the cleaned sales table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for every numeric column.
    pub fn describe(df: &DataFrame) -> Vec<ColumnSummary> {
        df.get_columns()
            .iter()
            .filter(|col| Self::is_numeric(col.dtype()))
            .map(|col| {
                let values = Self::numeric_values(col);
                Self::compute_summary(col.name().as_str(), &values)
            })
            .collect()
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    fn numeric_values(col: &Column) -> Vec<f64> {
        col.cast(&DataType::Float64)
            .ok()
            .and_then(|c| {
                c.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
            })
            .unwrap_or_default()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_summary(name: &str, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary {
                name: name.to_string(),
                ..ColumnSummary::default()
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnSummary {
            name: name.to_string(),
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

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

    /// Per-column null counts across the whole table.
    pub fn null_counts(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    /// Plain-text table of descriptive statistics for the reporter.
    pub fn format_describe(summaries: &[ColumnSummary]) -> String {
        let mut out = format!(
            "{:<24} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for s in summaries {
            out.push_str(&format!(
                "{:<24} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3}\n",
                s.name, s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
            ));
        }
        out
    }

    /// Plain-text table of null counts for the reporter.
    pub fn format_null_counts(counts: &[(String, usize)]) -> String {
        let mut out = String::from("Null values per column:\n");
        for (name, count) in counts {
            out.push_str(&format!("  {:<24} {}\n", name, count));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_hand_computed_values() {
        let s = StatsCalculator::compute_summary("x", &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < 1e-12);
        assert!((s.std - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert!((s.q25 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q75 - 3.25).abs() < 1e-12);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn summary_of_empty_column_is_nan() {
        let s = StatsCalculator::compute_summary("x", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }

    #[test]
    fn percentile_of_single_value() {
        assert_eq!(StatsCalculator::percentile(&[7.0], 95.0), 7.0);
    }

    #[test]
    fn describe_skips_non_numeric_and_ignores_nulls() {
        let df = df!(
            "Sales" => [Some(1.0), Some(3.0), None],
            "Region" => ["West", "East", "South"],
        )
        .unwrap();

        let summaries = StatsCalculator::describe(&df);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Sales");
        assert_eq!(summaries[0].count, 2);
        assert!((summaries[0].mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn null_counts_cover_every_column() {
        let df = df!(
            "Sales" => [Some(1.0), None],
            "Region" => ["West", "East"],
        )
        .unwrap();

        let counts = StatsCalculator::null_counts(&df);
        assert_eq!(counts.len(), 2);
        assert!(counts.contains(&("Sales".to_string(), 1)));
        assert!(counts.contains(&("Region".to_string(), 0)));
    }
}
