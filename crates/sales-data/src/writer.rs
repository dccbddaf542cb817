//! Cleaned-CSV output.

use std::path::Path;

use tracing::info;

use sales_core::error::{AnalysisError, Result};
use sales_core::models::GameRecord;

/// Write the cleaned table to `path` as CSV.
///
/// Columns are the source columns plus the derived `Global_Sales`, `Decade`
/// and `Success_Category`; records without a category get an empty cell.
/// Parent directories are created as needed.
pub fn write_clean_csv(path: &Path, records: &[GameRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| AnalysisError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| AnalysisError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} cleaned rows to {}", records.len(), path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
