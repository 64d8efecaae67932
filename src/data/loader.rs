//! CSV Data Loader Module
//! Handles CSV file loading and schema inspection using Polars.

use crate::data::columns;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column missing from input: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars for high performance.
pub struct SalesLoader {
    df: Option<DataFrame>,
}

impl Default for SalesLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars. Types are inferred per column; the
    /// required sales-table columns must all be present. Any failure here
    /// is fatal to the run.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path.to_path_buf())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let names = df.get_column_names();
        for required in columns::REQUIRED {
            if !names.iter().any(|n| n.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Structural summary: shape plus per-column name, dtype and non-null
    /// count. Informational only, nothing downstream consumes it.
    pub fn schema_summary(&self) -> String {
        let Some(df) = &self.df else {
            return String::new();
        };

        let mut out = format!("{} rows x {} columns\n", df.height(), df.width());
        for col in df.get_columns() {
            let non_null = df.height() - col.null_count();
            out.push_str(&format!(
                "  {:<24} {:<14} {} non-null\n",
                col.name().as_str(),
                col.dtype().to_string(),
                non_null
            ));
        }
        out
    }

    /// First `n` rows, rendered via Polars' table display.
    pub fn head(&self, n: usize) -> String {
        self.df
            .as_ref()
            .map(|df| format!("{}", df.head(Some(n))))
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Take ownership of the loaded DataFrame for the cleaning stage.
    pub fn take_dataframe(&mut self) -> Option<DataFrame> {
        self.df.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("salescope-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    const VALID_CSV: &str = "\
Order Date,Ship Date,Postal Code,Sales,Profit,Category,Region
1/1/2024,1/3/2024,90210,100.5,10.0,Furniture,West
1/15/2024,1/10/2024,,50.0,-5.0,Technology,East
";

    #[test]
    fn missing_file_is_fatal() {
        let mut loader = SalesLoader::new();
        let err = loader
            .load_csv(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn loads_valid_csv_and_reports_schema() {
        let path = temp_csv("valid.csv", VALID_CSV);
        let mut loader = SalesLoader::new();
        loader.load_csv(&path).unwrap();
        assert_eq!(loader.get_row_count(), 2);

        let summary = loader.schema_summary();
        assert!(summary.starts_with("2 rows x 7 columns"));
        assert!(summary.contains("Order Date"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let path = temp_csv(
            "missing-col.csv",
            "Order Date,Ship Date,Sales,Profit,Category,Region\n1/1/2024,1/3/2024,1.0,1.0,A,B\n",
        );
        let mut loader = SalesLoader::new();
        let err = loader.load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == "Postal Code"));
        fs::remove_file(path).ok();
    }
}
