//! Chart rendering
//!
//! - [`render_daily_service_chart`] writes the PNG produced by the `chart`
//!   command: one line per service over the days of the range.
//! - [`monthly_trend_svg`] and [`service_breakdown_svg`] return SVG markup
//!   embedded in the dashboard page.
//!
//! All functions refuse empty input with `AwsCostError::EmptyData`.

use awscost_core::aggregation_types::{DailyServicePivot, MonthlyCost, ServiceCost};
use awscost_core::error::{AwsCostError, Result};
use plotters::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::error::Error;
use std::path::Path;
use tracing::debug;

/// Marker and bar color used by the dashboard charts
pub const CHART_PINK: RGBColor = RGBColor(255, 182, 193);
/// Heading color of the dashboard theme
pub const CHART_ROSE: RGBColor = RGBColor(178, 58, 90);

pub const PNG_SIZE: (u32, u32) = (1000, 600);
pub const SVG_SIZE: (u32, u32) = (640, 400);

/// Longest x-axis label before truncation
const MAX_LABEL_CHARS: usize = 18;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Y axis range covering every value plus headroom, always including zero
fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let upper = if max > 0.0 { max * 1.1 } else { 1.0 };
    let lower = if min < 0.0 { min * 1.1 } else { 0.0 };
    (lower, upper)
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{head}…")
    }
}

/// Write a PNG line chart of daily cost per service
pub fn render_daily_service_chart(path: &Path, pivot: &DailyServicePivot, title: &str) -> Result<()> {
    if pivot.is_empty() {
        return Err(AwsCostError::EmptyData);
    }
    debug!(
        "Rendering {} services over {} days to {}",
        pivot.series.len(),
        pivot.dates.len(),
        path.display()
    );
    draw_daily_service_chart(path, pivot, title).map_err(|e| AwsCostError::Chart(e.to_string()))
}

fn draw_daily_service_chart(path: &Path, pivot: &DailyServicePivot, title: &str) -> DrawResult {
    let root = BitMapBackend::new(path, PNG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = pivot.dates.iter().map(|d| d.to_string()).collect();
    let (y_min, y_max) = y_bounds(
        pivot
            .series
            .iter()
            .flat_map(|(_, values)| values.iter().map(|v| to_f64(*v))),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0..labels.len(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|i| labels.get(*i).cloned().unwrap_or_default())
        .y_label_formatter(&|v| format!("{v:.2}"))
        .x_desc("Date")
        .y_desc("Cost ($)")
        .draw()?;

    for (idx, (service, values)) in pivot.series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i, to_f64(*v)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(service.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// SVG line chart of monthly totals
pub fn monthly_trend_svg(monthly: &[MonthlyCost]) -> Result<String> {
    if monthly.is_empty() {
        return Err(AwsCostError::EmptyData);
    }
    let mut svg = String::new();
    draw_monthly_trend(&mut svg, monthly).map_err(|e| AwsCostError::Chart(e.to_string()))?;
    Ok(svg)
}

fn draw_monthly_trend(svg: &mut String, monthly: &[MonthlyCost]) -> DrawResult {
    let root = SVGBackend::with_string(svg, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<&str> = monthly.iter().map(|m| m.month.as_str()).collect();
    let values: Vec<f64> = monthly.iter().map(|m| to_f64(m.total_cost)).collect();
    let (y_min, y_max) = y_bounds(values.iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly AWS Cost Trend", ("sans-serif", 20).into_font().color(&CHART_ROSE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0..labels.len(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|i| labels.get(*i).map(|l| l.to_string()).unwrap_or_default())
        .x_desc("Month")
        .y_desc("Total Cost ($)")
        .draw()?;

    let points: Vec<(usize, f64)> = values.into_iter().enumerate().collect();
    chart.draw_series(LineSeries::new(points.clone(), CHART_PINK.stroke_width(3)))?;
    chart.draw_series(
        points
            .into_iter()
            .map(|p| Circle::new(p, 5, CHART_PINK.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// SVG bar chart of per-service totals, in the order given
pub fn service_breakdown_svg(breakdown: &[ServiceCost]) -> Result<String> {
    if breakdown.is_empty() {
        return Err(AwsCostError::EmptyData);
    }
    let mut svg = String::new();
    draw_service_breakdown(&mut svg, breakdown).map_err(|e| AwsCostError::Chart(e.to_string()))?;
    Ok(svg)
}

fn draw_service_breakdown(svg: &mut String, breakdown: &[ServiceCost]) -> DrawResult {
    let root = SVGBackend::with_string(svg, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = breakdown
        .iter()
        .map(|s| short_label(s.service.as_str()))
        .collect();
    let values: Vec<f64> = breakdown.iter().map(|s| to_f64(s.total_cost)).collect();
    let (y_min, y_max) = y_bounds(values.iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption("Service Cost Breakdown", ("sans-serif", 20).into_font().color(&CHART_ROSE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Cost ($)")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(CHART_PINK.filled())
            .margin(6)
            .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
    )?;

    root.present()?;
    Ok(())
}
