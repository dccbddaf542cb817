use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales analyzer.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input CSV file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output artifact could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file lacks one of the required columns.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A row could not be parsed (non-numeric or negative sales figures).
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// Pass-through for CSV-level failures without a row position.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An aggregation was invoked on a table with zero rows.
    #[error("Dataset contains no records")]
    EmptyDataset,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_not_found() {
        let err = AnalysisError::InputNotFound(PathBuf::from("database/vgsales.csv"));
        assert_eq!(
            err.to_string(),
            "Input file not found: database/vgsales.csv"
        );
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AnalysisError::FileRead {
            path: PathBuf::from("/some/path.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/path.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AnalysisError::FileWrite {
            path: PathBuf::from("/out/chart.png"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write file"));
        assert!(msg.contains("/out/chart.png"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = AnalysisError::MissingColumn("NA_Sales".to_string());
        assert_eq!(err.to_string(), "Missing required column: NA_Sales");
    }

    #[test]
    fn test_error_display_malformed_record() {
        let err = AnalysisError::MalformedRecord {
            line: 42,
            message: "invalid float literal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record at line 42: invalid float literal"
        );
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let err = AnalysisError::EmptyDataset;
        assert_eq!(err.to_string(), "Dataset contains no records");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AnalysisError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_csv() {
        let csv_err = csv::ReaderBuilder::new()
            .from_reader("a,b\n1".as_bytes())
            .deserialize::<(f64, f64)>()
            .next()
            .unwrap()
            .unwrap_err();
        let err: AnalysisError = csv_err.into();
        assert!(err.to_string().contains("Failed to parse CSV"));
    }
}
