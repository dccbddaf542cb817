//! Interactive chart renderer built on [`plotly`].
//!
//! Each function builds one self-contained [`Plot`]; `render_interactive_charts`
//! writes them all as standalone HTML documents. Building the plots is pure,
//! which is what the tests exercise; only the write step touches disk.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotly::common::{Marker, Mode, Orientation, Title};
use plotly::layout::{Axis, BarMode, GridPattern, Layout, LayoutGrid};
use plotly::{Bar, Plot, Scatter};
use tracing::info;

use sales_core::formatting::percentage;
use sales_core::models::{GameRecord, Region};
use sales_data::analysis::SalesAnalysis;

use crate::artifacts;

/// Render every interactive chart into `output_dir`.
///
/// Returns the paths of the generated files, in render order.
pub fn render_interactive_charts(
    output_dir: &Path,
    records: &[GameRecord],
    analysis: &SalesAnalysis,
) -> Result<Vec<PathBuf>> {
    let plots: [(&str, Plot); 6] = [
        (
            artifacts::REGIONAL_SALES_OVER_TIME,
            regional_sales_plot(analysis),
        ),
        (artifacts::TOP_20_GAMES, top_games_plot(analysis)),
        (
            artifacts::PLATFORM_GENRE_BREAKDOWN,
            platform_genre_plot(records, analysis),
        ),
        (
            artifacts::YEARLY_SALES_SCATTER,
            yearly_scatter_plot(records, analysis),
        ),
        (
            artifacts::PUBLISHER_MARKET_SHARE,
            publisher_share_plot(analysis),
        ),
        (
            artifacts::SUCCESS_DISTRIBUTION,
            success_distribution_plot(analysis),
        ),
    ];

    let mut paths = Vec::with_capacity(plots.len());
    for (name, plot) in plots {
        let path = output_dir.join(name);
        plot.write_html(&path);
        info!("Interactive chart saved: {}", path.display());
        paths.push(path);
    }
    Ok(paths)
}

// ── Plot builders ─────────────────────────────────────────────────────────────

/// Four line+marker series, one per region, over the release years.
pub fn regional_sales_plot(analysis: &SalesAnalysis) -> Plot {
    let years: Vec<i32> = analysis.regional_by_year.keys().copied().collect();

    let mut plot = Plot::new();
    for region in Region::ALL {
        let values: Vec<f64> = analysis
            .regional_by_year
            .values()
            .map(|totals| totals.get(region))
            .collect();
        plot.add_trace(
            Scatter::new(years.clone(), values)
                .name(region.label())
                .mode(Mode::LinesMarkers),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Sales over Time by Region"))
            .x_axis(Axis::new().title(Title::with_text("Year")))
            .y_axis(Axis::new().title(Title::with_text("Sales (millions)")))
            .height(600),
    );
    plot
}

/// Horizontal bars for the 20 best-selling games, one trace per platform.
pub fn top_games_plot(analysis: &SalesAnalysis) -> Plot {
    let mut plot = Plot::new();

    // One trace per platform so the legend doubles as a platform key. Bars
    // are emitted worst-first so plotly stacks the best seller on top.
    let mut platforms: Vec<&str> = Vec::new();
    for record in &analysis.top_games {
        if !platforms.contains(&record.platform.as_str()) {
            platforms.push(record.platform.as_str());
        }
    }
    for platform in platforms {
        let games: Vec<&GameRecord> = analysis
            .top_games
            .iter()
            .filter(|r| r.platform == platform)
            .collect();
        let sales: Vec<f64> = games.iter().rev().map(|r| r.global_sales).collect();
        let names: Vec<String> = games.iter().rev().map(|r| r.name.clone()).collect();
        plot.add_trace(
            Bar::new(sales, names)
                .name(platform)
                .orientation(Orientation::Horizontal),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Top 20 Best-Selling Games"))
            .x_axis(Axis::new().title(Title::with_text("Global sales (millions)")))
            .height(700),
    );
    plot
}

/// Stacked bars: top-8 platforms on the x axis, one trace per genre.
pub fn platform_genre_plot(records: &[GameRecord], analysis: &SalesAnalysis) -> Plot {
    let platforms: Vec<String> = analysis
        .platform_sales
        .iter()
        .take(8)
        .map(|(name, _)| name.clone())
        .collect();
    let genres: Vec<String> = analysis
        .genre_sales
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    let mut plot = Plot::new();
    for genre in &genres {
        let values: Vec<f64> = platforms
            .iter()
            .map(|platform| {
                records
                    .iter()
                    .filter(|r| &r.platform == platform && &r.genre == genre)
                    .map(|r| r.global_sales)
                    .sum()
            })
            .collect();
        plot.add_trace(Bar::new(platforms.clone(), values).name(genre));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text(
                "Sales by Platform and Genre (Top 8 Platforms)",
            ))
            .x_axis(Axis::new().title(Title::with_text("Platform")))
            .y_axis(Axis::new().title(Title::with_text("Global sales (millions)")))
            .bar_mode(BarMode::Stack)
            .height(800),
    );
    plot
}

/// Bubble scatter of yearly sales for the top-5 platforms.
pub fn yearly_scatter_plot(records: &[GameRecord], analysis: &SalesAnalysis) -> Plot {
    let platforms: Vec<String> = analysis
        .platform_sales
        .iter()
        .take(5)
        .map(|(name, _)| name.clone())
        .collect();

    let mut plot = Plot::new();
    for platform in &platforms {
        let games: Vec<&GameRecord> = records
            .iter()
            .filter(|r| &r.platform == platform)
            .collect();
        let years: Vec<i32> = games.iter().map(|r| r.year).collect();
        let sales: Vec<f64> = games.iter().map(|r| r.global_sales).collect();
        let sizes: Vec<usize> = sales.iter().map(|s| bubble_size(*s)).collect();
        let names: Vec<String> = games.iter().map(|r| r.name.clone()).collect();
        plot.add_trace(
            Scatter::new(years, sales)
                .name(platform)
                .mode(Mode::Markers)
                .text_array(names)
                .marker(Marker::new().size_array(sizes)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text(
                "Sales over Time by Platform (Top 5)",
            ))
            .x_axis(Axis::new().title(Title::with_text("Year")))
            .y_axis(Axis::new().title(Title::with_text("Global sales (millions)")))
            .height(600),
    );
    plot
}

/// Top-20 publishers with their share of the global total as bar text.
pub fn publisher_share_plot(analysis: &SalesAnalysis) -> Plot {
    let total = analysis.summary.total_global_sales;
    let top: Vec<(String, f64)> = analysis.publisher_sales.iter().take(20).cloned().collect();

    let names: Vec<String> = top.iter().map(|(name, _)| name.clone()).collect();
    let values: Vec<f64> = top.iter().map(|(_, sales)| *sales).collect();
    let shares: Vec<String> = top
        .iter()
        .map(|(_, sales)| format!("{}%", percentage(*sales, total, 1)))
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(names, values).text_array(shares));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Market Share - Top 20 Publishers"))
            .y_axis(Axis::new().title(Title::with_text("Global sales (millions)")))
            .height(600),
    );
    plot
}

/// 2×2 grid of distribution bars: platforms, genres, decades, categories.
pub fn success_distribution_plot(analysis: &SalesAnalysis) -> Plot {
    let mut plot = Plot::new();

    let (platform_names, platform_values) = unzip_pairs(&analysis.platform_sales, 10);
    plot.add_trace(Bar::new(platform_names, platform_values).name("Platform"));

    let (genre_names, genre_values) = unzip_pairs(&analysis.genre_sales, usize::MAX);
    plot.add_trace(
        Bar::new(genre_names, genre_values)
            .name("Genre")
            .x_axis("x2")
            .y_axis("y2"),
    );

    let decade_names: Vec<String> = analysis
        .decade_counts
        .keys()
        .map(|decade| format!("{decade}s"))
        .collect();
    let decade_values: Vec<usize> = analysis.decade_counts.values().copied().collect();
    plot.add_trace(
        Bar::new(decade_names, decade_values)
            .name("Decade")
            .x_axis("x3")
            .y_axis("y3"),
    );

    let category_names: Vec<String> = analysis
        .category_counts
        .iter()
        .map(|(category, _)| category.label().to_string())
        .collect();
    let category_values: Vec<usize> = analysis
        .category_counts
        .iter()
        .map(|(_, count)| *count)
        .collect();
    plot.add_trace(
        Bar::new(category_names, category_values)
            .name("Success category")
            .x_axis("x4")
            .y_axis("y4"),
    );

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Sales Distributions"))
            .grid(
                LayoutGrid::new()
                    .rows(2)
                    .columns(2)
                    .pattern(GridPattern::Independent),
            )
            .show_legend(false)
            .height(800),
    );
    plot
}

// ── Data preparation ──────────────────────────────────────────────────────────

/// Marker size for a bubble scatter point, clamped to a sensible pixel range.
pub(crate) fn bubble_size(global_sales: f64) -> usize {
    ((global_sales * 4.0).ceil() as usize).clamp(6, 40)
}

/// Split the first `n` pairs of a descending aggregate into parallel vectors.
fn unzip_pairs(pairs: &[(String, f64)], n: usize) -> (Vec<String>, Vec<f64>) {
    pairs
        .iter()
        .take(n)
        .map(|(name, value)| (name.clone(), *value))
        .unzip()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
