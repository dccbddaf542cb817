//! Pure, read-only aggregations over the cleaned table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;

use sales_core::models::{GameRecord, Region, SuccessCategory};

// ── RegionTotals ──────────────────────────────────────────────────────────────

/// Per-region sales totals accumulated across records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionTotals {
    pub na: f64,
    pub eu: f64,
    pub jp: f64,
    pub other: f64,
}

impl RegionTotals {
    /// Add one record's regional figures to the running totals.
    pub fn add(&mut self, record: &GameRecord) {
        self.na += record.na_sales;
        self.eu += record.eu_sales;
        self.jp += record.jp_sales;
        self.other += record.other_sales;
    }

    /// The accumulated total for one region.
    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::NorthAmerica => self.na,
            Region::Europe => self.eu,
            Region::Japan => self.jp,
            Region::Other => self.other,
        }
    }

    /// Sum across all four regions.
    pub fn total(&self) -> f64 {
        self.na + self.eu + self.jp + self.other
    }
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups and ranks cleaned records.
pub struct SalesAggregator;

impl SalesAggregator {
    /// The `n` records with the largest `key`, descending.
    ///
    /// The sort is stable, so ties keep their original row order.
    pub fn top_n_by<'a, F>(records: &'a [GameRecord], n: usize, key: F) -> Vec<&'a GameRecord>
    where
        F: Fn(&GameRecord) -> f64,
    {
        let mut sorted: Vec<&GameRecord> = records.iter().collect();
        sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
        sorted.truncate(n);
        sorted
    }

    /// Sum `value` over the rows of each distinct `key`.
    ///
    /// Groups appear in discovery order (the order their first row appears in
    /// the table); use [`SalesAggregator::sorted_desc`] for "top" reporting.
    pub fn sum_by_group<K, V>(records: &[GameRecord], key: K, value: V) -> IndexMap<String, f64>
    where
        K: Fn(&GameRecord) -> &str,
        V: Fn(&GameRecord) -> f64,
    {
        let mut map: IndexMap<String, f64> = IndexMap::new();
        for record in records {
            *map.entry(key(record).to_string()).or_insert(0.0) += value(record);
        }
        map
    }

    /// Count the rows of each distinct `key`, in group-discovery order.
    pub fn count_by_group<K>(records: &[GameRecord], key: K) -> IndexMap<String, usize>
    where
        K: Fn(&GameRecord) -> &str,
    {
        let mut map: IndexMap<String, usize> = IndexMap::new();
        for record in records {
            *map.entry(key(record).to_string()).or_insert(0) += 1;
        }
        map
    }

    /// Reorder a grouped map descending by value (stable for equal values).
    pub fn sorted_desc<V>(map: &IndexMap<String, V>) -> Vec<(String, V)>
    where
        V: PartialOrd + Copy,
    {
        let mut pairs: Vec<(String, V)> = map
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        pairs
    }

    /// Sum `value` per release year, keys ascending.
    pub fn sum_by_year<V>(records: &[GameRecord], value: V) -> BTreeMap<i32, f64>
    where
        V: Fn(&GameRecord) -> f64,
    {
        let mut map: BTreeMap<i32, f64> = BTreeMap::new();
        for record in records {
            *map.entry(record.year).or_insert(0.0) += value(record);
        }
        map
    }

    /// Per-region sales totals per release year, keys ascending.
    pub fn regional_sums_by_year(records: &[GameRecord]) -> BTreeMap<i32, RegionTotals> {
        let mut map: BTreeMap<i32, RegionTotals> = BTreeMap::new();
        for record in records {
            map.entry(record.year).or_default().add(record);
        }
        map
    }

    /// Number of releases per year, keys ascending.
    pub fn count_by_year(records: &[GameRecord]) -> BTreeMap<i32, usize> {
        let mut map: BTreeMap<i32, usize> = BTreeMap::new();
        for record in records {
            *map.entry(record.year).or_insert(0) += 1;
        }
        map
    }

    /// Number of releases per decade, keys ascending.
    pub fn count_by_decade(records: &[GameRecord]) -> BTreeMap<i32, usize> {
        let mut map: BTreeMap<i32, usize> = BTreeMap::new();
        for record in records {
            *map.entry(record.decade).or_insert(0) += 1;
        }
        map
    }

    /// Record count per success category, in ascending category order.
    ///
    /// Records without a category (global sales outside `(0, 100]`) are not
    /// counted.
    pub fn count_by_category(records: &[GameRecord]) -> Vec<(SuccessCategory, usize)> {
        SuccessCategory::ALL
            .into_iter()
            .map(|category| {
                let count = records
                    .iter()
                    .filter(|r| r.success_category == Some(category))
                    .count();
                (category, count)
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
