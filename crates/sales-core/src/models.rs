use serde::{Deserialize, Serialize};

/// One of the four sales regions tracked in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthAmerica,
    Europe,
    Japan,
    Other,
}

impl Region {
    /// All regions, in the column order of the source file.
    pub const ALL: [Region; 4] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Japan,
        Region::Other,
    ];

    /// Human-readable region name used in reports and chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::Japan => "Japan",
            Region::Other => "Other",
        }
    }

    /// The source-file column this region's figures come from.
    pub fn column(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA_Sales",
            Region::Europe => "EU_Sales",
            Region::Japan => "JP_Sales",
            Region::Other => "Other_Sales",
        }
    }

    /// This region's sales figure for `record`, in millions of units.
    pub fn sales(&self, record: &GameRecord) -> f64 {
        match self {
            Region::NorthAmerica => record.na_sales,
            Region::Europe => record.eu_sales,
            Region::Japan => record.jp_sales,
            Region::Other => record.other_sales,
        }
    }
}

/// Ordinal label bucketing a record's global sales magnitude.
///
/// Buckets are half-open `(lo, hi]` intervals over fixed breakpoints, so a
/// boundary value belongs to the lower bucket: 0.1 is still `VeryLow`,
/// 5.0 is still `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SuccessCategory {
    #[serde(rename = "Very Low")]
    VeryLow,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Blockbuster")]
    Blockbuster,
}

impl SuccessCategory {
    /// All categories in ascending order of sales magnitude.
    pub const ALL: [SuccessCategory; 5] = [
        SuccessCategory::VeryLow,
        SuccessCategory::Low,
        SuccessCategory::Medium,
        SuccessCategory::High,
        SuccessCategory::Blockbuster,
    ];

    /// Bucket a global sales figure (millions of units).
    ///
    /// Returns `None` for values outside `(0, 100]`, including 0, negative
    /// values and NaN.
    pub fn classify(global_sales: f64) -> Option<Self> {
        if !(global_sales > 0.0 && global_sales <= 100.0) {
            return None;
        }
        Some(if global_sales <= 0.1 {
            SuccessCategory::VeryLow
        } else if global_sales <= 0.5 {
            SuccessCategory::Low
        } else if global_sales <= 1.0 {
            SuccessCategory::Medium
        } else if global_sales <= 5.0 {
            SuccessCategory::High
        } else {
            SuccessCategory::Blockbuster
        })
    }

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            SuccessCategory::VeryLow => "Very Low",
            SuccessCategory::Low => "Low",
            SuccessCategory::Medium => "Medium",
            SuccessCategory::High => "High",
            SuccessCategory::Blockbuster => "Blockbuster",
        }
    }
}

impl std::fmt::Display for SuccessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One cleaned game-release row.
///
/// Field renames match the column headers of the source file so the struct
/// serializes straight back to the cleaned CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sales rank carried over from the source file, when present.
    #[serde(rename = "Rank")]
    pub rank: Option<u64>,
    /// Game title; not guaranteed unique across platforms.
    #[serde(rename = "Name")]
    pub name: String,
    /// Platform code, e.g. `"PS2"` or `"Wii"`.
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Release year.
    #[serde(rename = "Year")]
    pub year: i32,
    /// Genre label, e.g. `"Sports"`.
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Publisher name; `"Unknown"` when the source cell was empty.
    #[serde(rename = "Publisher")]
    pub publisher: String,
    /// North America sales in millions of units.
    #[serde(rename = "NA_Sales")]
    pub na_sales: f64,
    /// Europe sales in millions of units.
    #[serde(rename = "EU_Sales")]
    pub eu_sales: f64,
    /// Japan sales in millions of units.
    #[serde(rename = "JP_Sales")]
    pub jp_sales: f64,
    /// Rest-of-world sales in millions of units.
    #[serde(rename = "Other_Sales")]
    pub other_sales: f64,
    /// Worldwide sales; the regional sum when the source had no such column.
    #[serde(rename = "Global_Sales")]
    pub global_sales: f64,
    /// Release year rounded down to the nearest 10.
    #[serde(rename = "Decade")]
    pub decade: i32,
    /// Sales-magnitude bucket; empty cell for values outside `(0, 100]`.
    #[serde(rename = "Success_Category")]
    pub success_category: Option<SuccessCategory>,
}

impl GameRecord {
    /// Sum of the four regional sales figures.
    pub fn regional_sum(&self) -> f64 {
        self.na_sales + self.eu_sales + self.jp_sales + self.other_sales
    }

    /// Whether at least one regional sales figure is strictly positive.
    pub fn has_regional_sales(&self) -> bool {
        self.na_sales > 0.0 || self.eu_sales > 0.0 || self.jp_sales > 0.0 || self.other_sales > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(global: f64) -> GameRecord {
        GameRecord {
            rank: Some(1),
            name: "Wii Sports".to_string(),
            platform: "Wii".to_string(),
            year: 2006,
            genre: "Sports".to_string(),
            publisher: "Nintendo".to_string(),
            na_sales: 41.49,
            eu_sales: 29.02,
            jp_sales: 3.77,
            other_sales: 8.46,
            global_sales: global,
            decade: 2000,
            success_category: SuccessCategory::classify(global),
        }
    }

    // ── SuccessCategory::classify ─────────────────────────────────────────────

    #[test]
    fn test_classify_zero_is_none() {
        assert_eq!(SuccessCategory::classify(0.0), None);
    }

    #[test]
    fn test_classify_negative_is_none() {
        assert_eq!(SuccessCategory::classify(-0.5), None);
    }

    #[test]
    fn test_classify_above_100_is_none() {
        assert_eq!(SuccessCategory::classify(100.01), None);
    }

    #[test]
    fn test_classify_nan_is_none() {
        assert_eq!(SuccessCategory::classify(f64::NAN), None);
    }

    #[test]
    fn test_classify_interior_values() {
        assert_eq!(
            SuccessCategory::classify(0.05),
            Some(SuccessCategory::VeryLow)
        );
        assert_eq!(SuccessCategory::classify(0.3), Some(SuccessCategory::Low));
        assert_eq!(
            SuccessCategory::classify(0.75),
            Some(SuccessCategory::Medium)
        );
        assert_eq!(SuccessCategory::classify(3.0), Some(SuccessCategory::High));
        assert_eq!(
            SuccessCategory::classify(30.0),
            Some(SuccessCategory::Blockbuster)
        );
    }

    #[test]
    fn test_classify_boundaries_belong_to_lower_bucket() {
        assert_eq!(
            SuccessCategory::classify(0.1),
            Some(SuccessCategory::VeryLow)
        );
        assert_eq!(SuccessCategory::classify(0.5), Some(SuccessCategory::Low));
        assert_eq!(
            SuccessCategory::classify(1.0),
            Some(SuccessCategory::Medium)
        );
        assert_eq!(SuccessCategory::classify(5.0), Some(SuccessCategory::High));
        assert_eq!(
            SuccessCategory::classify(100.0),
            Some(SuccessCategory::Blockbuster)
        );
    }

    #[test]
    fn test_classify_just_past_boundaries() {
        assert_eq!(
            SuccessCategory::classify(0.1 + 1e-9),
            Some(SuccessCategory::Low)
        );
        assert_eq!(
            SuccessCategory::classify(5.0 + 1e-9),
            Some(SuccessCategory::Blockbuster)
        );
    }

    #[test]
    fn test_classify_is_monotonic() {
        let samples = [0.01, 0.1, 0.2, 0.5, 0.7, 1.0, 2.0, 5.0, 10.0, 100.0];
        let categories: Vec<SuccessCategory> = samples
            .iter()
            .map(|v| SuccessCategory::classify(*v).unwrap())
            .collect();
        for pair in categories.windows(2) {
            assert!(pair[0] <= pair[1], "{:?} > {:?}", pair[0], pair[1]);
        }
    }

    // ── SuccessCategory display ───────────────────────────────────────────────

    #[test]
    fn test_category_labels() {
        assert_eq!(SuccessCategory::VeryLow.to_string(), "Very Low");
        assert_eq!(SuccessCategory::Blockbuster.to_string(), "Blockbuster");
    }

    // ── Region ────────────────────────────────────────────────────────────────

    #[test]
    fn test_region_labels_and_columns() {
        assert_eq!(Region::NorthAmerica.label(), "North America");
        assert_eq!(Region::NorthAmerica.column(), "NA_Sales");
        assert_eq!(Region::Other.label(), "Other");
        assert_eq!(Region::Other.column(), "Other_Sales");
    }

    #[test]
    fn test_region_sales_accessor() {
        let record = make_record(82.74);
        assert!((Region::NorthAmerica.sales(&record) - 41.49).abs() < f64::EPSILON);
        assert!((Region::Europe.sales(&record) - 29.02).abs() < f64::EPSILON);
        assert!((Region::Japan.sales(&record) - 3.77).abs() < f64::EPSILON);
        assert!((Region::Other.sales(&record) - 8.46).abs() < f64::EPSILON);
    }

    // ── GameRecord ────────────────────────────────────────────────────────────

    #[test]
    fn test_regional_sum() {
        let record = make_record(82.74);
        assert!((record.regional_sum() - 82.74).abs() < 1e-9);
    }

    #[test]
    fn test_has_regional_sales() {
        let mut record = make_record(82.74);
        assert!(record.has_regional_sales());
        record.na_sales = 0.0;
        record.eu_sales = 0.0;
        record.jp_sales = 0.0;
        record.other_sales = 0.0;
        assert!(!record.has_regional_sales());
    }
}
