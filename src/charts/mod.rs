//! Charts module - aggregation and chart rendering
//!
//! Five independent chart artifacts, each a filtered or aggregated view of
//! the cleaned table rendered to a PNG:
//! 1. Sales distribution (histogram + density, outliers excluded from view)
//! 2. Profit distribution (same form)
//! 3. Total Sales by Category (bar)
//! 4. Total Profit by Region (bar)
//! 5. Monthly sales trend (line over the Order Date key)

pub mod aggregate;
mod renderer;

use crate::config::AnalysisConfig;
use crate::data::columns;
use crate::report::Reporter;
use plotters::style::colors::{BLUE, GREEN, RED};
use plotters::style::RGBColor;
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

const ORANGE: RGBColor = RGBColor(237, 125, 49);
const PURPLE: RGBColor = RGBColor(155, 89, 182);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to create chart directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),
    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),
    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
}

/// Render all five charts into `config.chart_dir` and return their paths.
pub fn render_all(
    df: &DataFrame,
    config: &AnalysisConfig,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>, ChartError> {
    std::fs::create_dir_all(&config.chart_dir)?;
    let mut paths = Vec::with_capacity(5);

    let sales = aggregate::values_in_range(df, columns::SALES, config.sales_range)?;
    let sales_hist = aggregate::histogram(&sales, config.sales_range, config.bin_count);
    let path = config.chart_dir.join("sales_distribution.png");
    renderer::render_histogram(
        &sales_hist,
        "Sales Distribution (Excluding Outliers)",
        "Sales",
        BLUE,
        &path,
    )?;
    paths.push(path);

    let profit = aggregate::values_in_range(df, columns::PROFIT, config.profit_range)?;
    let profit_hist = aggregate::histogram(&profit, config.profit_range, config.bin_count);
    let path = config.chart_dir.join("profit_distribution.png");
    renderer::render_histogram(
        &profit_hist,
        "Profit Distribution (Excluding Outliers)",
        "Profit",
        GREEN,
        &path,
    )?;
    paths.push(path);

    let category_sales = aggregate::group_sum(df, columns::CATEGORY, columns::SALES)?;
    let path = config.chart_dir.join("sales_by_category.png");
    renderer::render_bar_chart(
        &category_sales,
        "Total Sales by Category",
        "Category",
        "Sales",
        ORANGE,
        &path,
    )?;
    paths.push(path);

    let region_profit = aggregate::group_sum(df, columns::REGION, columns::PROFIT)?;
    let path = config.chart_dir.join("profit_by_region.png");
    renderer::render_bar_chart(
        &region_profit,
        "Total Profit by Region",
        "Region",
        "Profit",
        PURPLE,
        &path,
    )?;
    paths.push(path);

    let monthly = aggregate::monthly_totals(df, columns::ORDER_DATE, columns::SALES)?;
    let path = config.chart_dir.join("monthly_sales_trend.png");
    renderer::render_trend(&monthly, "Monthly Sales Trend", "Sales", RED, &path)?;
    paths.push(path);

    for path in &paths {
        reporter.emit_summary(&format!("wrote {}", path.display()));
    }
    Ok(paths)
}
