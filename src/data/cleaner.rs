//! Data Cleaner Module
//! Type-fixes the sales table in place: lenient date parsing, postal-code
//! sentinel fill, derived ship-duration column, and the Order Date re-key.
//!
//! Value-level anomalies never fail here; they degrade to nulls or the
//! sentinel. Only structural problems (a named column missing) error out.

use crate::data::columns;
use crate::report::Reporter;
use crate::stats::StatsCalculator;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

/// Sentinel substituted for missing postal codes.
pub const POSTAL_SENTINEL: &str = "Unknown";

/// `NaiveDate::from_ymd(1970, 1, 1).num_days_from_ce()`
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date formats accepted by [`coerce_date`], tried in order. The source
/// dataset uses US-style dates; ISO is accepted for robustness.
const DATE_FORMATS: [&str; 5] = ["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%y"];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Lenient parse of one date cell. Anything unrecognized (including the
/// empty string) coerces to `None`; this function cannot fail.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Days since 1970-01-01, the physical representation of a Polars date.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`days_since_epoch`].
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Handles in-place cleaning of the loaded sales table.
pub struct Cleaner;

impl Cleaner {
    /// Run the full cleaning sequence. Row count is preserved; re-running
    /// on an already-cleaned table changes nothing.
    pub fn clean(df: &mut DataFrame, reporter: &dyn Reporter) -> Result<(), CleanError> {
        Self::parse_date_column(df, columns::ORDER_DATE)?;
        Self::parse_date_column(df, columns::SHIP_DATE)?;

        // Diagnostic only; mirrors the null inspection done before filling.
        let nulls = StatsCalculator::null_counts(df);
        reporter.emit_summary(&StatsCalculator::format_null_counts(&nulls));

        Self::fill_postal_code(df)?;
        Self::add_ship_duration(df)?;
        Self::key_by_order_date(df)?;
        Ok(())
    }

    /// Parse a text column to `DataType::Date`, coercing unparseable cells
    /// to null. A no-op when the column is already a date column.
    pub fn parse_date_column(df: &mut DataFrame, name: &str) -> Result<(), CleanError> {
        let col = df.column(name)?;
        if matches!(col.dtype(), DataType::Date) {
            return Ok(());
        }

        let text = col.cast(&DataType::String)?;
        let text = text.str()?;
        let days: Vec<Option<i32>> = text
            .into_iter()
            .map(|cell| cell.and_then(coerce_date).map(days_since_epoch))
            .collect();

        let parsed = Column::new(name.into(), days).cast(&DataType::Date)?;
        df.with_column(parsed)?;
        Ok(())
    }

    /// Replace nulls in `Postal Code` with the `"Unknown"` sentinel. The
    /// column widens to string; non-null values keep their textual form.
    pub fn fill_postal_code(df: &mut DataFrame) -> Result<(), CleanError> {
        let col = df.column(columns::POSTAL_CODE)?;

        let mut filled: Vec<String> = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let val = col.get(i)?;
            if val.is_null() {
                filled.push(POSTAL_SENTINEL.to_string());
            } else {
                filled.push(val.to_string().trim_matches('"').to_string());
            }
        }

        df.with_column(Column::new(columns::POSTAL_CODE.into(), filled))?;
        Ok(())
    }

    /// Derive `Order_to_Ship_Duration` as the signed whole-day difference
    /// `Ship Date - Order Date`; null whenever either date is null.
    /// Negative durations are preserved.
    pub fn add_ship_duration(df: &mut DataFrame) -> Result<(), CleanError> {
        let order = df.column(columns::ORDER_DATE)?.cast(&DataType::Int32)?;
        let ship = df.column(columns::SHIP_DATE)?.cast(&DataType::Int32)?;
        let order = order.i32()?;
        let ship = ship.i32()?;

        let days: Vec<Option<i64>> = order
            .into_iter()
            .zip(ship.into_iter())
            .map(|(o, s)| match (o, s) {
                (Some(o), Some(s)) => Some(i64::from(s) - i64::from(o)),
                _ => None,
            })
            .collect();

        df.with_column(Column::new(columns::SHIP_DURATION.into(), days))?;
        Ok(())
    }

    /// Re-key the table by `Order Date` (stable sort, nulls last). This is
    /// the structural mutation that backs monthly resampling; content and
    /// row count are untouched.
    pub fn key_by_order_date(df: &mut DataFrame) -> Result<(), CleanError> {
        *df = df.sort(
            [columns::ORDER_DATE],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;

    fn sample_frame() -> DataFrame {
        df!(
            columns::ORDER_DATE => ["1/1/2024", "1/15/2024", ""],
            columns::SHIP_DATE => ["1/3/2024", "1/10/2024", "2/5/2024"],
            columns::POSTAL_CODE => [Some(90210i64), None, Some(10001)],
            columns::SALES => [100.0, 50.0, 200.0],
            columns::PROFIT => [10.0, -5.0, 20.0],
            columns::CATEGORY => ["Furniture", "Technology", "Furniture"],
            columns::REGION => ["West", "East", "West"],
        )
        .unwrap()
    }

    fn cleaned_sample() -> DataFrame {
        let mut df = sample_frame();
        Cleaner::clean(&mut df, &MemoryReporter::new()).unwrap();
        df
    }

    #[test]
    fn coerce_date_accepts_known_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(coerce_date("1/31/2024"), Some(expected));
        assert_eq!(coerce_date("2024-01-31"), Some(expected));
        assert_eq!(coerce_date(" 1/31/2024 "), Some(expected));
    }

    #[test]
    fn coerce_date_degrades_to_none() {
        assert_eq!(coerce_date(""), None);
        assert_eq!(coerce_date("   "), None);
        assert_eq!(coerce_date("not a date"), None);
        assert_eq!(coerce_date("13/45/2024"), None);
    }

    #[test]
    fn cleaning_preserves_row_count() {
        let df = sample_frame();
        let before = df.height();
        let cleaned = cleaned_sample();
        assert_eq!(cleaned.height(), before);
    }

    #[test]
    fn duration_is_null_iff_either_date_is_null() {
        let df = cleaned_sample();
        let order = df
            .column(columns::ORDER_DATE)
            .unwrap()
            .cast(&DataType::Int32)
            .unwrap();
        let duration = df.column(columns::SHIP_DURATION).unwrap();
        for i in 0..df.height() {
            let order_null = order.get(i).unwrap().is_null();
            let duration_null = duration.get(i).unwrap().is_null();
            assert_eq!(order_null, duration_null);
        }
        // Unparseable order date row is still present, with a null duration.
        assert_eq!(duration.null_count(), 1);
    }

    #[test]
    fn duration_may_be_negative() {
        let df = cleaned_sample();
        let duration = df.column(columns::SHIP_DURATION).unwrap();
        let duration = duration.i64().unwrap();
        // Rows are keyed by Order Date: 1/1 ships in 2 days, 1/15 ships
        // five days before it was ordered.
        assert_eq!(duration.get(0), Some(2));
        assert_eq!(duration.get(1), Some(-5));
    }

    #[test]
    fn postal_code_filled_with_sentinel_and_originals_kept() {
        let df = cleaned_sample();
        let postal = df.column(columns::POSTAL_CODE).unwrap();
        assert_eq!(postal.null_count(), 0);

        let postal = postal.str().unwrap();
        let values: Vec<&str> = postal.into_iter().map(|v| v.unwrap()).collect();
        assert!(values.contains(&"90210"));
        assert!(values.contains(&"10001"));
        assert!(values.contains(&POSTAL_SENTINEL));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = cleaned_sample();
        let mut twice = once.clone();
        Cleaner::clean(&mut twice, &MemoryReporter::new()).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn null_counts_are_reported() {
        let mut df = sample_frame();
        let reporter = MemoryReporter::new();
        Cleaner::clean(&mut df, &reporter).unwrap();
        let report = reporter.joined();
        assert!(report.contains(columns::ORDER_DATE));
        assert!(report.contains(columns::POSTAL_CODE));
    }
}
