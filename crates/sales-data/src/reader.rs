//! CSV loading for the sales analyzer.
//!
//! Reads raw game-release rows from the Kaggle `vgsales.csv` layout and
//! converts them into [`RawRow`] structs for the cleaning pass.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use sales_core::error::{AnalysisError, Result};

/// Columns that must be present in the input file.
///
/// `Rank` and `Global_Sales` are optional: `Rank` is carried through when
/// present, `Global_Sales` is derived from the regional columns when absent.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
];

/// One row exactly as read from the source file, before cleaning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Rank", default)]
    pub rank: Option<u64>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Missing in the raw file for some rows; blank and `N/A` cells map to
    /// `None`.
    #[serde(rename = "Year", default, deserialize_with = "de_opt_year")]
    pub year: Option<i32>,
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Blank and `N/A` cells map to `None`; the cleaner substitutes the
    /// `"Unknown"` sentinel.
    #[serde(rename = "Publisher", default, deserialize_with = "de_opt_text")]
    pub publisher: Option<String>,
    #[serde(rename = "NA_Sales")]
    pub na_sales: f64,
    #[serde(rename = "EU_Sales")]
    pub eu_sales: f64,
    #[serde(rename = "JP_Sales")]
    pub jp_sales: f64,
    #[serde(rename = "Other_Sales")]
    pub other_sales: f64,
    #[serde(rename = "Global_Sales", default)]
    pub global_sales: Option<f64>,
}

/// Load every row of the delimited file at `path`.
///
/// Fails with [`AnalysisError::InputNotFound`] when the path does not exist,
/// [`AnalysisError::MissingColumn`] when a required header is absent, and
/// [`AnalysisError::MalformedRecord`] when a sales field is non-numeric,
/// non-finite or negative. Failures propagate; nothing is skipped silently.
pub fn load_raw_rows(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(AnalysisError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| AnalysisError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalysisError::MissingColumn(column.to_string()));
        }
    }

    let mut rows: Vec<RawRow> = Vec::new();
    for (index, result) in reader.deserialize::<RawRow>().enumerate() {
        // Header occupies line 1, so the first data row is line 2.
        let line = (index + 2) as u64;
        let row = result.map_err(|e| AnalysisError::MalformedRecord {
            line: e.position().map(|p| p.line()).unwrap_or(line),
            message: e.to_string(),
        })?;
        validate_sales_fields(&row, line)?;
        rows.push(row);
    }

    debug!("Loaded {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Reject non-finite or negative sales figures.
///
/// Rows with a negative regional value could otherwise derive a zero or
/// negative `Global_Sales`, which has no defined success category.
fn validate_sales_fields(row: &RawRow, line: u64) -> Result<()> {
    let fields = [
        ("NA_Sales", row.na_sales),
        ("EU_Sales", row.eu_sales),
        ("JP_Sales", row.jp_sales),
        ("Other_Sales", row.other_sales),
    ];
    for (column, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalysisError::MalformedRecord {
                line,
                message: format!("invalid value {value} in column {column}"),
            });
        }
    }
    if let Some(global) = row.global_sales {
        if !global.is_finite() || global < 0.0 {
            return Err(AnalysisError::MalformedRecord {
                line,
                message: format!("invalid value {global} in column Global_Sales"),
            });
        }
    }
    Ok(())
}

/// Parse an optional year cell.
///
/// The Kaggle file stores missing years as `N/A`; pandas-style float years
/// ("2006.0") are truncated to the integer year.
fn de_opt_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("N/A") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(|year| Some(year as i32))
            .map_err(|_| serde::de::Error::custom(format!("invalid year: {text}"))),
    }
}

/// Parse an optional text cell, mapping blank and `N/A` to `None`.
fn de_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        None | Some("") | Some("N/A") => None,
        Some(text) => Some(text.to_string()),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
