//! Error types for the Irisboard library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Irisboard operations.
#[derive(Debug, Error)]
pub enum IrisboardError {
    /// The table is malformed or a numeric column holds non-numeric data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format or column type not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no columns to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A named column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Error downloading a remote data source.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error reading or writing Parquet files.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error building or converting Arrow arrays.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// HTML template error.
    #[error("Template error: {0}")]
    Template(#[from] tinytemplate::error::Error),

    /// Error drawing a chart.
    #[error("Plot error: {0}")]
    Plot(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Irisboard operations.
pub type Result<T> = std::result::Result<T, IrisboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_convert() {
        let csv_err = csv::ReaderBuilder::new()
            .from_reader("a,b\n1\n".as_bytes())
            .records()
            .find_map(|r| r.err())
            .unwrap();
        let err: IrisboardError = csv_err.into();
        assert!(matches!(err, IrisboardError::Csv(_)));
        assert!(err.to_string().starts_with("CSV error:"));

        let err = IrisboardError::ColumnNotFound("petal_area".to_string());
        assert_eq!(err.to_string(), "Column not found: petal_area");
    }
}
