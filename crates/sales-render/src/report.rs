//! Console insight report.
//!
//! Pure text rendering over the analysis result: callers hand in any
//! `io::Write`, so the aggregation layer stays print-free and the report is
//! testable against an in-memory buffer.

use std::io;
use std::io::Write;

use sales_core::formatting::{format_millions, format_number};
use sales_data::analysis::SalesAnalysis;
use sales_data::cleaner::CleaningSummary;

/// Width of the `=` section banners.
const BANNER_WIDTH: usize = 80;

/// Write a section banner: a rule, the title, a rule.
pub fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))
}

/// Write the row counts recorded by the cleaning pass.
pub fn render_cleaning_summary(out: &mut impl Write, summary: &CleaningSummary) -> io::Result<()> {
    writeln!(out, "\nRows in source file: {}", summary.rows_in)?;
    writeln!(
        out,
        "Dropped (missing year): {}",
        summary.dropped_missing_year
    )?;
    writeln!(
        out,
        "Dropped (no positive regional sales): {}",
        summary.dropped_zero_sales
    )?;
    writeln!(out, "Rows after cleaning: {}", summary.rows_out)
}

/// Write the seven insight groups, in fixed order.
pub fn render_insights(out: &mut impl Write, analysis: &SalesAnalysis) -> io::Result<()> {
    let summary = &analysis.summary;

    writeln!(out, "\n1. TOP 5 BEST-SELLING GAMES:")?;
    for record in analysis.top_games.iter().take(5) {
        writeln!(
            out,
            "   {} ({}, {}, {}) - {}",
            record.name,
            record.platform,
            record.year,
            record.genre,
            format_millions(record.global_sales)
        )?;
    }

    writeln!(out, "\n2. TOP 5 PLATFORMS BY SALES:")?;
    for (platform, sales) in analysis.platform_sales.iter().take(5) {
        writeln!(out, "   {}: {}", platform, format_millions(*sales))?;
    }

    writeln!(out, "\n3. TOP 5 GENRES BY SALES:")?;
    for (genre, sales) in analysis.genre_sales.iter().take(5) {
        writeln!(out, "   {}: {}", genre, format_millions(*sales))?;
    }

    writeln!(out, "\n4. TOP 5 PUBLISHERS BY SALES:")?;
    for (publisher, sales) in analysis.publisher_sales.iter().take(5) {
        writeln!(out, "   {}: {}", publisher, format_millions(*sales))?;
    }

    writeln!(out, "\n5. REGIONAL ANALYSIS:")?;
    for share in &summary.region_shares {
        writeln!(
            out,
            "   {}: {} ({}% of global sales)",
            share.region.label(),
            format_millions(share.total),
            format_number(share.share, 1)
        )?;
    }

    writeln!(out, "\n6. TEMPORAL ANALYSIS:")?;
    writeln!(
        out,
        "   Best year: {} with {} in sales",
        summary.best_year,
        format_millions(summary.best_year_sales)
    )?;
    writeln!(
        out,
        "   Year with most releases: {} with {} games",
        summary.busiest_year, summary.busiest_year_releases
    )?;

    writeln!(out, "\n7. GENERAL STATISTICS:")?;
    writeln!(out, "   Total games: {}", summary.total_games)?;
    writeln!(out, "   Total platforms: {}", summary.distinct_platforms)?;
    writeln!(out, "   Total genres: {}", summary.distinct_genres)?;
    writeln!(out, "   Total publishers: {}", summary.distinct_publishers)?;
    writeln!(
        out,
        "   Total global sales: {}",
        format_millions(summary.total_global_sales)
    )?;
    writeln!(
        out,
        "   Mean sales per game: {}",
        format_millions(summary.mean_global_sales)
    )?;
    writeln!(
        out,
        "   Median sales per game: {}",
        format_millions(summary.median_global_sales)
    )
}

/// Write the success banner and the list of generated files.
pub fn render_completion(out: &mut impl Write, files: &[String]) -> io::Result<()> {
    writeln!(out)?;
    banner(out, "ANALYSIS COMPLETED SUCCESSFULLY!")?;
    writeln!(out, "\nGenerated files:")?;
    for file in files {
        writeln!(out, "  - {file}")?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
