//! Data source metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about a loaded data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name (or last URL segment).
    pub name: String,
    /// Full path or URL the data came from.
    pub location: String,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size of the raw contents in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the source was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a source whose raw bytes have been read.
    pub fn new(
        location: impl Into<String>,
        contents: &[u8],
        format: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let location = location.into();
        let name = location
            .trim_end_matches('/')
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            name,
            location,
            hash: content_hash(contents),
            size_bytes: contents.len() as u64,
            format: format.into(),
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// `sha256:<hex>` digest of raw contents.
pub(crate) fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_url() {
        let meta = SourceMetadata::new("https://example.org/raw/iris.csv", b"a,b\n1,2\n", "csv", 1, 2);
        assert_eq!(meta.name, "iris.csv");
        assert_eq!(meta.size_bytes, 8);
        assert!(meta.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_name_from_path() {
        let meta = SourceMetadata::new("data/iris.csv", b"", "csv", 0, 0);
        assert_eq!(meta.name, "iris.csv");
    }
}
