//! Summary statistics over the cleaned table.

use std::collections::HashSet;

use sales_core::error::{AnalysisError, Result};
use sales_core::formatting::percentage;
use sales_core::models::{GameRecord, Region};

use crate::aggregator::{RegionTotals, SalesAggregator};

/// One region's total and its share of global sales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionShare {
    pub region: Region,
    /// Total sales in millions of units.
    pub total: f64,
    /// Share of the global total, in percent.
    pub share: f64,
}

/// Scalar statistics for the insight report.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub total_games: usize,
    pub distinct_platforms: usize,
    pub distinct_genres: usize,
    pub distinct_publishers: usize,
    pub total_global_sales: f64,
    pub mean_global_sales: f64,
    pub median_global_sales: f64,
    /// Year with the highest total global sales (first such year on ties).
    pub best_year: i32,
    pub best_year_sales: f64,
    /// Year with the most releases (first such year on ties).
    pub busiest_year: i32,
    pub busiest_year_releases: usize,
    pub region_shares: [RegionShare; 4],
}

impl SalesSummary {
    /// Compute the summary over a non-empty cleaned table.
    ///
    /// Fails with [`AnalysisError::EmptyDataset`] on a zero-row table so that
    /// means and shares are never computed against a zero denominator.
    pub fn compute(records: &[GameRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        let total_games = records.len();
        let distinct_platforms = distinct(records, |r| r.platform.as_str());
        let distinct_genres = distinct(records, |r| r.genre.as_str());
        let distinct_publishers = distinct(records, |r| r.publisher.as_str());

        let total_global_sales: f64 = records.iter().map(|r| r.global_sales).sum();
        let mean_global_sales = total_global_sales / total_games as f64;
        let median_global_sales = median(records.iter().map(|r| r.global_sales).collect());

        let yearly_sales = SalesAggregator::sum_by_year(records, |r| r.global_sales);
        let (best_year, best_year_sales) = yearly_sales
            .iter()
            .fold((0, f64::MIN), |(year, max), (&y, &v)| {
                if v > max {
                    (y, v)
                } else {
                    (year, max)
                }
            });

        let yearly_counts = SalesAggregator::count_by_year(records);
        let (busiest_year, busiest_year_releases) =
            yearly_counts.iter().fold((0, 0), |(year, max), (&y, &c)| {
                if c > max {
                    (y, c)
                } else {
                    (year, max)
                }
            });

        let mut totals = RegionTotals::default();
        for record in records {
            totals.add(record);
        }
        let region_shares = Region::ALL.map(|region| {
            let total = totals.get(region);
            RegionShare {
                region,
                total,
                share: percentage(total, total_global_sales, 1),
            }
        });

        Ok(SalesSummary {
            total_games,
            distinct_platforms,
            distinct_genres,
            distinct_publishers,
            total_global_sales,
            mean_global_sales,
            median_global_sales,
            best_year,
            best_year_sales,
            busiest_year,
            busiest_year_releases,
            region_shares,
        })
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn distinct<'a, F>(records: &'a [GameRecord], key: F) -> usize
where
    F: Fn(&'a GameRecord) -> &'a str,
{
    records.iter().map(key).collect::<HashSet<&str>>().len()
}

/// Median of a non-empty list; mean of the two middle values for even counts.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::models::SuccessCategory;

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
            record("Alpha", "Wii", 2006, [2.0, 1.0, 0.5, 0.5]), // 4.0
            record("Beta", "PS2", 2001, [1.0, 1.0, 0.0, 0.0]),  // 2.0
            record("Gamma", "Wii", 2008, [0.5, 0.25, 0.15, 0.1]), // 1.0
            record("Delta", "DS", 2006, [0.5, 0.25, 0.15, 0.1]), // 1.0
        ]
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = SalesSummary::compute(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_counts_and_distincts() {
        let summary = SalesSummary::compute(&sample_records()).unwrap();
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.distinct_platforms, 3);
        assert_eq!(summary.distinct_genres, 1);
        assert_eq!(summary.distinct_publishers, 1);
    }

    #[test]
    fn test_total_mean_median() {
        let summary = SalesSummary::compute(&sample_records()).unwrap();
        assert!((summary.total_global_sales - 8.0).abs() < 1e-9);
        assert!((summary.mean_global_sales - 2.0).abs() < 1e-9);
        // Sorted globals: 1.0, 1.0, 2.0, 4.0 → median 1.5.
        assert!((summary.median_global_sales - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_median_odd_count() {
        let records = vec![
            record("A", "Wii", 2000, [1.0, 0.0, 0.0, 0.0]),
            record("B", "Wii", 2000, [3.0, 0.0, 0.0, 0.0]),
            record("C", "Wii", 2000, [2.0, 0.0, 0.0, 0.0]),
        ];
        let summary = SalesSummary::compute(&records).unwrap();
        assert!((summary.median_global_sales - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_and_busiest_year() {
        let summary = SalesSummary::compute(&sample_records()).unwrap();
        // 2006 totals 5.0 and has two releases.
        assert_eq!(summary.best_year, 2006);
        assert!((summary.best_year_sales - 5.0).abs() < 1e-9);
        assert_eq!(summary.busiest_year, 2006);
        assert_eq!(summary.busiest_year_releases, 2);
    }

    #[test]
    fn test_best_year_tie_takes_first() {
        let records = vec![
            record("A", "Wii", 2001, [1.0, 0.0, 0.0, 0.0]),
            record("B", "Wii", 2002, [1.0, 0.0, 0.0, 0.0]),
        ];
        let summary = SalesSummary::compute(&records).unwrap();
        assert_eq!(summary.best_year, 2001);
        assert_eq!(summary.busiest_year, 2001);
    }

    #[test]
    fn test_region_shares_sum_to_100() {
        let summary = SalesSummary::compute(&sample_records()).unwrap();
        let share_sum: f64 = summary.region_shares.iter().map(|s| s.share).sum();
        // Rounded to one decimal per region, so allow a small drift.
        assert!((share_sum - 100.0).abs() < 0.3, "share_sum = {share_sum}");
    }

    #[test]
    fn test_region_share_values() {
        let summary = SalesSummary::compute(&sample_records()).unwrap();
        let na = &summary.region_shares[0];
        assert_eq!(na.region, Region::NorthAmerica);
        assert!((na.total - 4.0).abs() < 1e-9);
        assert!((na.share - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_global_total_does_not_divide_by_zero() {
        // Sourced Global_Sales of zero with positive regional figures is the
        // pathological case the share guard exists for.
        let mut record = record("A", "Wii", 2000, [1.0, 0.0, 0.0, 0.0]);
        record.global_sales = 0.0;
        record.success_category = None;
        let summary = SalesSummary::compute(&[record]).unwrap();
        assert_eq!(summary.region_shares[0].share, 0.0);
        assert!(summary.region_shares.iter().all(|s| s.share.is_finite()));
    }
}
