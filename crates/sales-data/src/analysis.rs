//! Main analysis pipeline for the sales analyzer.
//!
//! Bundles the summary statistics and every aggregate the report and chart
//! renderers consume into one [`SalesAnalysis`] value.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use sales_core::error::Result;
use sales_core::models::{GameRecord, SuccessCategory};

use crate::aggregator::{RegionTotals, SalesAggregator};
use crate::summary::SalesSummary;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of cleaned records analysed.
    pub records_analyzed: usize,
    /// Wall-clock seconds spent aggregating.
    pub elapsed_seconds: f64,
}

/// The complete output of [`analyze_sales`].
#[derive(Debug, Clone)]
pub struct SalesAnalysis {
    /// Scalar statistics for the insight report.
    pub summary: SalesSummary,
    /// The 20 best-selling games, descending.
    pub top_games: Vec<GameRecord>,
    /// Global sales per platform, descending.
    pub platform_sales: Vec<(String, f64)>,
    /// Global sales per genre, descending.
    pub genre_sales: Vec<(String, f64)>,
    /// Global sales per publisher, descending.
    pub publisher_sales: Vec<(String, f64)>,
    /// Release counts per platform, descending.
    pub platform_counts: Vec<(String, usize)>,
    /// Global sales per release year, keys ascending.
    pub yearly_sales: BTreeMap<i32, f64>,
    /// Release counts per year, keys ascending.
    pub yearly_counts: BTreeMap<i32, usize>,
    /// Per-region sales per year, keys ascending.
    pub regional_by_year: BTreeMap<i32, RegionTotals>,
    /// Release counts per decade, keys ascending.
    pub decade_counts: BTreeMap<i32, usize>,
    /// Record counts per success category, ascending category order.
    pub category_counts: Vec<(SuccessCategory, usize)>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every aggregation over the cleaned table.
///
/// Read-only over `records`; fails with `EmptyDataset` (via
/// [`SalesSummary::compute`]) when the table has no rows.
pub fn analyze_sales(records: &[GameRecord]) -> Result<SalesAnalysis> {
    let start = std::time::Instant::now();

    let summary = SalesSummary::compute(records)?;

    let top_games: Vec<GameRecord> = SalesAggregator::top_n_by(records, 20, |r| r.global_sales)
        .into_iter()
        .cloned()
        .collect();

    let platform_sales = SalesAggregator::sorted_desc(&SalesAggregator::sum_by_group(
        records,
        |r| r.platform.as_str(),
        |r| r.global_sales,
    ));
    let genre_sales = SalesAggregator::sorted_desc(&SalesAggregator::sum_by_group(
        records,
        |r| r.genre.as_str(),
        |r| r.global_sales,
    ));
    let publisher_sales = SalesAggregator::sorted_desc(&SalesAggregator::sum_by_group(
        records,
        |r| r.publisher.as_str(),
        |r| r.global_sales,
    ));
    let platform_counts = SalesAggregator::sorted_desc(&SalesAggregator::count_by_group(
        records,
        |r| r.platform.as_str(),
    ));

    let yearly_sales = SalesAggregator::sum_by_year(records, |r| r.global_sales);
    let yearly_counts = SalesAggregator::count_by_year(records);
    let regional_by_year = SalesAggregator::regional_sums_by_year(records);
    let decade_counts = SalesAggregator::count_by_decade(records);
    let category_counts = SalesAggregator::count_by_category(records);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_analyzed: records.len(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    debug!(
        "Analyzed {} records in {:.3}s",
        metadata.records_analyzed, metadata.elapsed_seconds
    );

    Ok(SalesAnalysis {
        summary,
        top_games,
        platform_sales,
        genre_sales,
        publisher_sales,
        platform_counts,
        yearly_sales,
        yearly_counts,
        regional_by_year,
        decade_counts,
        category_counts,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::error::AnalysisError;

    fn record(name: &str, platform: &str, year: i32, sales: [f64; 4]) -> GameRecord {
        let global = sales.iter().sum();
        GameRecord {
            rank: None,
            name: name.to_string(),
            platform: platform.to_string(),
            year,
            genre: "Action".to_string(),
            publisher: "Sony".to_string(),
            na_sales: sales[0],
            eu_sales: sales[1],
            jp_sales: sales[2],
            other_sales: sales[3],
            global_sales: global,
            decade: (year / 10) * 10,
            success_category: SuccessCategory::classify(global),
        }
    }

    fn sample_records() -> Vec<GameRecord> {
        vec![
            record("Alpha", "Wii", 2006, [2.0, 1.0, 0.5, 0.5]),
            record("Beta", "PS2", 2001, [1.0, 1.0, 0.0, 0.0]),
            record("Gamma", "Wii", 2008, [0.5, 0.25, 0.15, 0.1]),
        ]
    }

    #[test]
    fn test_analyze_empty_table_fails() {
        let err = analyze_sales(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_analyze_basic_pipeline() {
        let analysis = analyze_sales(&sample_records()).unwrap();

        assert_eq!(analysis.summary.total_games, 3);
        assert_eq!(analysis.top_games.len(), 3);
        assert_eq!(analysis.top_games[0].name, "Alpha");
        assert_eq!(analysis.platform_sales[0].0, "Wii");
        assert_eq!(analysis.metadata.records_analyzed, 3);
        assert!(!analysis.metadata.generated_at.is_empty());
        assert!(analysis.metadata.elapsed_seconds >= 0.0);
    }

    #[test]
    fn test_analyze_top_games_capped_at_20() {
        let records: Vec<GameRecord> = (0..30)
            .map(|i| {
                record(
                    &format!("Game {i}"),
                    "Wii",
                    2000,
                    [i as f64 + 1.0, 0.0, 0.0, 0.0],
                )
            })
            .collect();
        let analysis = analyze_sales(&records).unwrap();
        assert_eq!(analysis.top_games.len(), 20);
        assert_eq!(analysis.top_games[0].name, "Game 29");
    }

    #[test]
    fn test_analyze_series_keys_ascending() {
        let analysis = analyze_sales(&sample_records()).unwrap();
        let years: Vec<i32> = analysis.yearly_sales.keys().copied().collect();
        assert_eq!(years, vec![2001, 2006, 2008]);
        let decades: Vec<i32> = analysis.decade_counts.keys().copied().collect();
        assert_eq!(decades, vec![2000]);
    }

    #[test]
    fn test_analyze_grand_totals_consistent() {
        let analysis = analyze_sales(&sample_records()).unwrap();
        let platform_total: f64 = analysis.platform_sales.iter().map(|(_, v)| v).sum();
        assert!((platform_total - analysis.summary.total_global_sales).abs() < 1e-9);
        let yearly_total: f64 = analysis.yearly_sales.values().sum();
        assert!((yearly_total - analysis.summary.total_global_sales).abs() < 1e-9);
    }
}
