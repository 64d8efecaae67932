//! Chart Aggregation Module
//! Chart-local views of the cleaned table: range filters, histogram bins
//! with a Gaussian density overlay, group-by-sum, and the calendar-month
//! resample. None of these mutate the table.

use crate::data::date_from_days;
use chrono::Datelike;
use polars::prelude::*;
use statrs::distribution::{Continuous, Normal};
use std::collections::BTreeMap;

/// Number of evaluation points for the density overlay.
const KDE_GRID_POINTS: usize = 200;

/// Binned histogram plus a count-scaled density curve.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub range: (f64, f64),
    pub bin_width: f64,
    pub counts: Vec<usize>,
    /// Gaussian KDE sampled on a regular grid, scaled so it overlays the
    /// counts. Empty when there are too few values to estimate one.
    pub density: Vec<(f64, f64)>,
}

/// Sales total for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

impl MonthlyTotal {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Non-null values of a numeric column within a closed range. The table
/// itself keeps its out-of-range rows.
pub fn values_in_range(
    df: &DataFrame,
    column: &str,
    range: (f64, f64),
) -> PolarsResult<Vec<f64>> {
    let col = df.column(column)?.cast(&DataType::Float64)?;
    let values = col.f64()?;
    Ok(values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan() && *v >= range.0 && *v <= range.1)
        .collect())
}

/// Bin values (assumed within `range`) into `bin_count` fixed-width bins
/// and estimate a density overlay. Values on the upper edge land in the
/// last bin.
pub fn histogram(values: &[f64], range: (f64, f64), bin_count: usize) -> Histogram {
    let bin_count = bin_count.max(1);
    let span = (range.1 - range.0).max(f64::MIN_POSITIVE);
    let bin_width = span / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - range.0) / bin_width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    Histogram {
        range,
        bin_width,
        counts,
        density: kde_curve(values, range, bin_width),
    }
}

/// Gaussian kernel density estimate with Silverman's bandwidth, scaled to
/// count space (`density * n * bin_width`) so it overlays the histogram.
fn kde_curve(values: &[f64], range: (f64, f64), bin_width: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std <= 0.0 {
        return Vec::new();
    }

    let Ok(kernel) = Normal::new(0.0, 1.0) else {
        return Vec::new();
    };

    let bandwidth = 1.06 * std * (n as f64).powf(-0.2);
    let step = (range.1 - range.0) / (KDE_GRID_POINTS - 1) as f64;

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = range.0 + i as f64 * step;
            let sum: f64 = values.iter().map(|v| kernel.pdf((x - v) / bandwidth)).sum();
            (x, sum / bandwidth * bin_width)
        })
        .collect()
}

/// Sum `value_col` per distinct value of `key_col`. Keys come back sorted;
/// null keys and null values are skipped.
pub fn group_sum(df: &DataFrame, key_col: &str, value_col: &str) -> PolarsResult<Vec<(String, f64)>> {
    let keys = df.column(key_col)?;
    let values = df.column(value_col)?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for i in 0..df.height() {
        let key = keys.get(i)?;
        if key.is_null() {
            continue;
        }
        let Some(v) = values.get(i) else { continue };
        if v.is_nan() {
            continue;
        }
        *totals
            .entry(key.to_string().trim_matches('"').to_string())
            .or_insert(0.0) += v;
    }

    Ok(totals.into_iter().collect())
}

/// Resample `value_col` into calendar-month totals keyed by `date_col`.
/// Rows with a null date are excluded; months between the first and last
/// observed month with no rows appear with total 0.
pub fn monthly_totals(
    df: &DataFrame,
    date_col: &str,
    value_col: &str,
) -> PolarsResult<Vec<MonthlyTotal>> {
    let dates = df.column(date_col)?.cast(&DataType::Int32)?;
    let dates = dates.i32()?;
    let values = df.column(value_col)?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (day, value) in dates.into_iter().zip(values.into_iter()) {
        let (Some(day), Some(value)) = (day, value) else {
            continue;
        };
        let Some(date) = date_from_days(day) else {
            continue;
        };
        *totals.entry((date.year(), date.month())).or_insert(0.0) += value;
    }

    let mut out = Vec::new();
    let bounds = totals
        .keys()
        .next()
        .copied()
        .zip(totals.keys().next_back().copied());
    if let Some((first, last)) = bounds {
        let (mut year, mut month) = first;
        loop {
            out.push(MonthlyTotal {
                year,
                month,
                total: totals.get(&(year, month)).copied().unwrap_or(0.0),
            });
            if (year, month) == last {
                break;
            }
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
    }
    Ok(out)
}
