//! Salescope - Sales CSV Exploratory Analysis & Chart Generator
//!
//! Linear pipeline over one sales table: load CSV, clean and type-fix
//! columns, print descriptive statistics, render five charts.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use anyhow::Context;
use config::AnalysisConfig;
use data::{Cleaner, SalesLoader};
use report::{ConsoleReporter, Reporter};
use stats::StatsCalculator;

fn main() -> anyhow::Result<()> {
    let config = AnalysisConfig::default();
    let reporter = ConsoleReporter;

    let mut loader = SalesLoader::new();
    loader
        .load_csv(&config.file_path)
        .with_context(|| format!("failed to load {}", config.file_path.display()))?;
    reporter.emit_summary(&loader.schema_summary());
    reporter.emit_summary(&loader.head(5));

    let mut df = loader.take_dataframe().context("no data loaded")?;
    Cleaner::clean(&mut df, &reporter).context("cleaning failed")?;

    let summaries = StatsCalculator::describe(&df);
    reporter.emit_summary(&StatsCalculator::format_describe(&summaries));

    let paths = charts::render_all(&df, &config, &reporter).context("chart rendering failed")?;
    if config.open_charts {
        for path in &paths {
            if let Err(e) = open::that(path) {
                reporter.emit_summary(&format!("could not open {}: {e}", path.display()));
            }
        }
    }

    Ok(())
}
