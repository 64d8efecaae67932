//! Chart Renderer Module
//! Draws the chart PNGs with plotters' bitmap backend. Each function takes
//! an already-aggregated view and an output path; nothing here touches the
//! sales table.

use crate::charts::aggregate::{Histogram, MonthlyTotal};
use crate::charts::ChartError;
use plotters::prelude::*;
use std::path::Path;

const HISTOGRAM_SIZE: (u32, u32) = (800, 500);
const BAR_CHART_SIZE: (u32, u32) = (1000, 600);
const TREND_SIZE: (u32, u32) = (1200, 600);

/// Histogram with density overlay, x-axis clamped to the filter range.
pub fn render_histogram(
    hist: &Histogram,
    title: &str,
    x_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(output_path, HISTOGRAM_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let count_max = hist.counts.iter().copied().max().unwrap_or(0) as f64;
    let density_max = hist
        .density
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0f64, f64::max);
    let y_max = count_max.max(density_max).max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(hist.range.0..hist.range.1, 0.0..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Count")
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(hist.counts.iter().enumerate().map(|(i, &count)| {
            let x0 = hist.range.0 + i as f64 * hist.bin_width;
            Rectangle::new(
                [(x0, 0.0), (x0 + hist.bin_width, count as f64)],
                color.mix(0.55).filled(),
            )
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    if !hist.density.is_empty() {
        chart
            .draw_series(LineSeries::new(
                hist.density.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Bar chart over categorical keys. Negative totals draw below the axis.
pub fn render_bar_chart(
    pairs: &[(String, f64)],
    title: &str,
    x_label: &str,
    y_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(output_path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let y_min = pairs.iter().map(|(_, v)| *v).fold(0.0f64, f64::min);
    let y_max = pairs.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let span = (y_max - y_min).max(1.0);
    let y_range = (y_min - 0.05 * span)..(y_max + 0.05 * span);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d((0..pairs.len()).into_segmented(), y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if *i < pairs.len() => pairs[*i].0.clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(pairs.iter().enumerate().map(|(i, (_, total))| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *total),
                ],
                color.mix(0.7).filled(),
            );
            bar.set_margin(0, 0, 10, 10);
            bar
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Line chart of monthly totals over time.
pub fn render_trend(
    months: &[MonthlyTotal],
    title: &str,
    y_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(output_path, TREND_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let x_max = months.len().saturating_sub(1).max(1) as f64;
    let y_min = months.iter().map(|m| m.total).fold(0.0f64, f64::min);
    let y_max = months.iter().map(|m| m.total).fold(0.0f64, f64::max);
    let span = (y_max - y_min).max(1.0);
    let y_range = (y_min - 0.05 * span)..(y_max + 0.05 * span);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(y_label)
        .x_labels(months.len().min(12))
        .x_label_formatter(&|x| {
            let i = x.round() as usize;
            if (x - i as f64).abs() < 1e-6 && i < months.len() {
                months[i].label()
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            months.iter().enumerate().map(|(i, m)| (i as f64, m.total)),
            color.stroke_width(2),
        ))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}
