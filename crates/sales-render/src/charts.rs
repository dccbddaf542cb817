//! Static chart renderer built on [`plotters`].
//!
//! Produces the three PNG artifacts: the exploratory overview, the category
//! breakdown and the sales histograms. Each figure is a 2×2 grid of subplots
//! drawn onto one bitmap.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use sales_core::models::{GameRecord, Region};
use sales_data::aggregator::RegionTotals;
use sales_data::analysis::SalesAnalysis;

use crate::artifacts;

// Palette carried over from the matplotlib color names of the original charts.
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const CORAL: RGBColor = RGBColor(255, 127, 80);
const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const SEA_GREEN: RGBColor = RGBColor(46, 139, 87);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render every static chart into `output_dir`.
///
/// Returns the paths of the generated files, in render order.
pub fn render_static_charts(
    output_dir: &Path,
    records: &[GameRecord],
    analysis: &SalesAnalysis,
) -> Result<Vec<PathBuf>> {
    let overview = output_dir.join(artifacts::EXPLORATORY_OVERVIEW);
    render_exploratory_overview(&overview, analysis)?;
    info!("Chart saved: {}", overview.display());

    let breakdown = output_dir.join(artifacts::CATEGORY_BREAKDOWN);
    render_category_breakdown(&breakdown, records, analysis)?;
    info!("Chart saved: {}", breakdown.display());

    let histograms = output_dir.join(artifacts::SALES_HISTOGRAMS);
    render_sales_histograms(&histograms, records, analysis)?;
    info!("Chart saved: {}", histograms.display());

    Ok(vec![overview, breakdown, histograms])
}

// ── Figures ───────────────────────────────────────────────────────────────────

fn render_exploratory_overview(path: &Path, analysis: &SalesAnalysis) -> Result<()> {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 2));

    let top_platforms = take_pairs(&analysis.platform_sales, 10);
    draw_bar_chart(
        &areas[0],
        "Top 10 Platforms by Global Sales",
        "Platform",
        "Global sales (millions)",
        &top_platforms,
        &SKY_BLUE,
    )?;

    draw_barh_chart(
        &areas[1],
        "Global Sales by Genre",
        "Global sales (millions)",
        &analysis.genre_sales,
        &CORAL,
    )?;

    let shares: Vec<(String, f64)> = analysis
        .summary
        .region_shares
        .iter()
        .map(|s| (s.region.label().to_string(), s.share))
        .collect();
    draw_bar_chart(
        &areas[2],
        "Sales Distribution by Region",
        "Region",
        "Share of global sales (%)",
        &shares,
        &SEA_GREEN,
    )?;

    draw_year_area(
        &areas[3],
        "Global Sales over Time",
        "Global sales (millions)",
        &analysis.yearly_sales,
        &SEA_GREEN,
    )?;

    root.present()?;
    Ok(())
}

fn render_category_breakdown(
    path: &Path,
    records: &[GameRecord],
    analysis: &SalesAnalysis,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 2));

    let top_platforms: Vec<String> = analysis
        .platform_sales
        .iter()
        .take(10)
        .map(|(name, _)| name.clone())
        .collect();
    let matrix = regional_matrix(records, &top_platforms);
    draw_heatmap(
        &areas[0],
        "Regional Sales by Platform (Top 10)",
        &top_platforms,
        &matrix,
    )?;

    let decades: Vec<(String, f64)> = analysis
        .decade_counts
        .iter()
        .map(|(decade, count)| (format!("{decade}s"), *count as f64))
        .collect();
    draw_bar_chart(
        &areas[1],
        "Games Released per Decade",
        "Decade",
        "Number of games",
        &decades,
        &PURPLE,
    )?;

    let categories: Vec<(String, f64)> = analysis
        .category_counts
        .iter()
        .map(|(category, count)| (category.label().to_string(), *count as f64))
        .collect();
    draw_bar_chart(
        &areas[2],
        "Games per Success Category",
        "Success category",
        "Number of games",
        &categories,
        &ORANGE,
    )?;

    let platform_counts: Vec<(String, f64)> = analysis
        .platform_counts
        .iter()
        .take(10)
        .map(|(name, count)| (name.clone(), *count as f64))
        .collect();
    draw_barh_chart(
        &areas[3],
        "Top 10 Platforms by Number of Games",
        "Number of games",
        &platform_counts,
        &STEEL_BLUE,
    )?;

    root.present()?;
    Ok(())
}

fn render_sales_histograms(
    path: &Path,
    records: &[GameRecord],
    analysis: &SalesAnalysis,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 2));

    let globals: Vec<f64> = records.iter().map(|r| r.global_sales).collect();
    draw_histogram(
        &areas[0],
        "Distribution of Global Sales",
        &globals,
        50,
        analysis.summary.mean_global_sales,
        analysis.summary.median_global_sales,
    )?;

    let yearly: Vec<(i32, f64)> = analysis
        .yearly_sales
        .iter()
        .map(|(year, sales)| (*year, *sales))
        .collect();
    draw_year_bars(
        &areas[1],
        "Total Sales by Release Year",
        "Total sales (millions)",
        &yearly,
        &ORANGE,
    )?;

    let top_platforms = take_pairs(&analysis.platform_sales, 10);
    draw_barh_chart(
        &areas[2],
        "Top 10 Platforms - Total Sales",
        "Total sales (millions)",
        &top_platforms,
        &SEA_GREEN,
    )?;

    let releases: Vec<(i32, f64)> = analysis
        .yearly_counts
        .iter()
        .map(|(year, count)| (*year, *count as f64))
        .collect();
    draw_year_bars(
        &areas[3],
        "Games Released per Year",
        "Number of games",
        &releases,
        &PURPLE,
    )?;

    root.present()?;
    Ok(())
}

// ── Subplot helpers ───────────────────────────────────────────────────────────

/// Vertical bars over categorical labels.
fn draw_bar_chart(
    area: &Area<'_>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    data: &[(String, f64)],
    color: &RGBColor,
) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    let n = data.len();
    let y_max = nice_max(data.iter().map(|(_, v)| *v));
    let labels: Vec<&str> = data.iter().map(|(label, _)| label.as_str()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| label_at(&labels, *x))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, (_, value))| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, *value)],
            color.filled(),
        )
    }))?;
    Ok(())
}

/// Horizontal bars over categorical labels, largest at the top.
fn draw_barh_chart(
    area: &Area<'_>,
    title: &str,
    x_desc: &str,
    data: &[(String, f64)],
    color: &RGBColor,
) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    let n = data.len();
    let x_max = nice_max(data.iter().map(|(_, v)| *v));
    // Row 0 of `data` is drawn at the top of the axis.
    let labels: Vec<&str> = data.iter().rev().map(|(label, _)| label.as_str()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|y| label_at(&labels, *y))
        .x_desc(x_desc)
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, (_, value))| {
        let y = (n - 1 - i) as f64;
        Rectangle::new([(0.0, y - 0.35), (*value, y + 0.35)], color.filled())
    }))?;
    Ok(())
}

/// Filled area plus line over a year-keyed series.
fn draw_year_area(
    area: &Area<'_>,
    title: &str,
    y_desc: &str,
    series: &BTreeMap<i32, f64>,
    color: &RGBColor,
) -> Result<()> {
    let (Some(&min_year), Some(&max_year)) = (series.keys().next(), series.keys().last()) else {
        return Ok(());
    };
    let y_max = nice_max(series.values().copied());
    let points: Vec<(i32, f64)> = series.iter().map(|(year, value)| (*year, *value)).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(min_year..max_year + 1, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(AreaSeries::new(points.clone(), 0.0, color.mix(0.25)))?;
    chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
    Ok(())
}

/// One bar per year over a year-keyed series.
fn draw_year_bars(
    area: &Area<'_>,
    title: &str,
    y_desc: &str,
    series: &[(i32, f64)],
    color: &RGBColor,
) -> Result<()> {
    let Some(min_year) = series.iter().map(|(year, _)| *year).min() else {
        return Ok(());
    };
    let Some(max_year) = series.iter().map(|(year, _)| *year).max() else {
        return Ok(());
    };
    let y_max = nice_max(series.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (min_year as f64 - 0.5)..(max_year as f64 + 0.5),
            0f64..y_max,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .x_desc("Year")
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(series.iter().map(|(year, value)| {
        let x = *year as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *value)], color.filled())
    }))?;
    Ok(())
}

/// Region × platform heatmap with per-cell value annotations.
fn draw_heatmap(
    area: &Area<'_>,
    title: &str,
    platforms: &[String],
    matrix: &[[f64; 4]],
) -> Result<()> {
    if platforms.is_empty() {
        return Ok(());
    }
    let rows = platforms.len();
    let max = matrix
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(0.0f64, f64::max);
    let region_labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
    // Row 0 of `matrix` is drawn at the top of the axis.
    let platform_labels: Vec<&str> = platforms.iter().rev().map(String::as_str).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5f64..3.5f64, -0.5f64..(rows as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(4)
        .x_label_formatter(&|x| label_at(&region_labels, *x))
        .y_labels(rows)
        .y_label_formatter(&|y| label_at(&platform_labels, *y))
        .draw()?;

    chart.draw_series(matrix.iter().enumerate().flat_map(|(row, values)| {
        let y = (rows - 1 - row) as f64;
        values.iter().enumerate().map(move |(col, value)| {
            let x = col as f64;
            let (r, g, b) = heat_color(if max > 0.0 { value / max } else { 0.0 });
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                RGBColor(r, g, b).filled(),
            )
        })
    }))?;

    chart.draw_series(matrix.iter().enumerate().flat_map(|(row, values)| {
        let y = (rows - 1 - row) as f64;
        values.iter().enumerate().map(move |(col, value)| {
            Text::new(
                format!("{value:.0}"),
                (col as f64 - 0.1, y),
                ("sans-serif", 14).into_font(),
            )
        })
    }))?;
    Ok(())
}

/// Binned histogram with mean and median markers.
fn draw_histogram(
    area: &Area<'_>,
    title: &str,
    values: &[f64],
    bins: usize,
    mean: f64,
    median: f64,
) -> Result<()> {
    let binned = histogram_bins(values, bins);
    let Some(&(_, x_max, _)) = binned.last() else {
        return Ok(());
    };
    let y_max = nice_max(binned.iter().map(|(_, _, count)| *count as f64));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Global sales (millions)")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(binned.iter().map(|(start, end, count)| {
        Rectangle::new([(*start, 0.0), (*end, *count as f64)], STEEL_BLUE.filled())
    }))?;

    chart
        .draw_series(LineSeries::new(vec![(mean, 0.0), (mean, y_max)], &RED))?
        .label(format!("Mean: {mean:.2}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart
        .draw_series(LineSeries::new(vec![(median, 0.0), (median, y_max)], &GREEN))?
        .label(format!("Median: {median:.2}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

// ── Data preparation ──────────────────────────────────────────────────────────

/// First `n` label/value pairs of a descending aggregate.
fn take_pairs(pairs: &[(String, f64)], n: usize) -> Vec<(String, f64)> {
    pairs.iter().take(n).cloned().collect()
}

/// Per-platform regional totals, row order following `platforms`.
fn regional_matrix(records: &[GameRecord], platforms: &[String]) -> Vec<[f64; 4]> {
    platforms
        .iter()
        .map(|platform| {
            let mut totals = RegionTotals::default();
            for record in records.iter().filter(|r| &r.platform == platform) {
                totals.add(record);
            }
            [totals.na, totals.eu, totals.jp, totals.other]
        })
        .collect()
}

/// Equal-width bins over `[0, max]`; returns `(start, end, count)` per bin.
///
/// Empty when there are no values or every value is zero.
pub(crate) fn histogram_bins(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    if values.is_empty() || bins == 0 || max <= 0.0 {
        return Vec::new();
    }
    let width = max / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        if value < 0.0 {
            continue;
        }
        let index = ((value / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (i as f64 * width, (i as f64 + 1.0) * width, count))
        .collect()
}

/// Axis maximum with 10% headroom; 1.0 for all-zero data.
pub(crate) fn nice_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values.into_iter().fold(0.0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// White-to-red ramp for heatmap cells; `t` is clamped to `[0, 1]`.
pub(crate) fn heat_color(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let g = (255.0 - 180.0 * t).round() as u8;
    let b = (230.0 - 190.0 * t).round() as u8;
    (255, g, b)
}

/// Categorical axis label for a fractional tick position.
fn label_at(labels: &[&str], position: f64) -> String {
    let index = position.round();
    if index < 0.0 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
