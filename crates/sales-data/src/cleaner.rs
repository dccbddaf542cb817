//! Cleaning and derivation pass over the raw table.
//!
//! Applies the fixed sequence of filters and derived columns that turns
//! [`RawRow`]s into [`GameRecord`]s: drop rows without a year, substitute the
//! `"Unknown"` publisher sentinel, drop rows with no positive regional sales,
//! derive `Global_Sales` where absent, then `Decade` and `Success_Category`.

use tracing::info;

use sales_core::models::{GameRecord, SuccessCategory};

use crate::reader::RawRow;

/// Row counts recorded while cleaning, for the report and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningSummary {
    /// Rows read from the source file.
    pub rows_in: usize,
    /// Rows dropped because the year cell was missing.
    pub dropped_missing_year: usize,
    /// Rows dropped because no regional sales figure was positive.
    pub dropped_zero_sales: usize,
    /// Rows retained in the cleaned table.
    pub rows_out: usize,
}

impl CleaningSummary {
    /// Total rows removed by the cleaning pass.
    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

/// Run the cleaning pass.
///
/// Filter and derivation order matters and matches the documented pipeline;
/// each step is total over the table. The pass is idempotent: cleaning an
/// already-clean table changes nothing.
pub fn clean(rows: Vec<RawRow>) -> (Vec<GameRecord>, CleaningSummary) {
    let rows_in = rows.len();
    let mut dropped_missing_year = 0usize;
    let mut dropped_zero_sales = 0usize;
    let mut records: Vec<GameRecord> = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(year) = row.year else {
            dropped_missing_year += 1;
            continue;
        };

        let any_positive = row.na_sales > 0.0
            || row.eu_sales > 0.0
            || row.jp_sales > 0.0
            || row.other_sales > 0.0;
        if !any_positive {
            dropped_zero_sales += 1;
            continue;
        }

        let publisher = row.publisher.unwrap_or_else(|| "Unknown".to_string());
        let global_sales = row
            .global_sales
            .unwrap_or(row.na_sales + row.eu_sales + row.jp_sales + row.other_sales);
        // Years in this dataset are positive, so truncating division is the
        // same as flooring.
        let decade = (year / 10) * 10;
        let success_category = SuccessCategory::classify(global_sales);

        records.push(GameRecord {
            rank: row.rank,
            name: row.name,
            platform: row.platform,
            year,
            genre: row.genre,
            publisher,
            na_sales: row.na_sales,
            eu_sales: row.eu_sales,
            jp_sales: row.jp_sales,
            other_sales: row.other_sales,
            global_sales,
            decade,
            success_category,
        });
    }

    let summary = CleaningSummary {
        rows_in,
        dropped_missing_year,
        dropped_zero_sales,
        rows_out: records.len(),
    };
    info!(
        "Cleaned {} rows: {} retained, {} dropped",
        summary.rows_in,
        summary.rows_out,
        summary.rows_dropped()
    );
    (records, summary)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
