//! Preparation pipeline: load raw data, drop outliers, persist the result.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::input::{write_parquet, Parser, ParserConfig, SourceMetadata};
use crate::outlier::{IqrBounds, OutlierFilter};

/// Public copy of the raw Iris measurements.
pub const DEFAULT_DATA_URL: &str = "https://gist.githubusercontent.com/curran/a08a1080b88344b0c8a7/raw/0e7a9b0a5d22642a06d3d5b9bcbad9890c8ee534/iris.csv";

/// Where the cleaned table is written unless configured otherwise.
pub const DEFAULT_OUTPUT: &str = "data/iris_data_clean.parquet";

/// Where raw data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Configuration for a preparation run.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Outlier filter settings.
    pub filter: OutlierFilter,
    /// Destination Parquet file.
    pub output: PathBuf,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            filter: OutlierFilter::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Result of a preparation run.
#[derive(Debug, Clone, Serialize)]
pub struct PrepReport {
    /// Metadata about the raw source.
    pub source: SourceMetadata,
    pub original_rows: usize,
    pub cleaned_rows: usize,
    pub columns: usize,
    /// Bounds applied to each numeric column, in filter order.
    pub bounds: Vec<IqrBounds>,
    /// Where the cleaned table was written.
    pub output: PathBuf,
}

impl PrepReport {
    /// Rows dropped as outliers.
    pub fn removed(&self) -> usize {
        self.original_rows - self.cleaned_rows
    }
}

/// Loads, cleans and stores a dataset.
pub struct Preparation {
    config: PrepConfig,
    parser: Parser,
}

impl Preparation {
    pub fn new(config: PrepConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Run the pipeline against `source` and write the cleaned table.
    pub fn run(&self, source: &DataSource) -> Result<PrepReport> {
        let (table, metadata) = match source {
            DataSource::Url(url) => self.parser.parse_url(url)?,
            DataSource::File(path) => self.parser.parse_file(path)?,
        };
        info!(
            source = %source,
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded raw data"
        );

        let outcome = self.config.filter.filter(&table)?;
        info!(
            rows = outcome.table.row_count(),
            removed = outcome.removed,
            strategy = %self.config.filter.strategy(),
            "Removed outliers"
        );

        self.write(&outcome.table, &self.config.output)?;

        Ok(PrepReport {
            source: metadata,
            original_rows: table.row_count(),
            cleaned_rows: outcome.table.row_count(),
            columns: outcome.table.column_count(),
            bounds: outcome.bounds,
            output: self.config.output.clone(),
        })
    }

    fn write(&self, table: &crate::input::DataTable, path: &Path) -> Result<()> {
        write_parquet(table, path)?;
        info!(path = %path.display(), "Wrote cleaned data");
        Ok(())
    }
}

impl Default for Preparation {
    fn default() -> Self {
        Self::new(PrepConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read_parquet;
    use std::io::Write;
    use tempfile::TempDir;

    const RAW: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
4.7,3.2,1.3,0.2,setosa
4.6,3.1,1.5,0.2,setosa
5.0,3.6,1.4,0.2,setosa
5.4,3.9,1.7,0.4,setosa
4.6,3.4,1.4,0.3,setosa
5.0,3.4,1.5,0.2,setosa
4.4,9.9,1.4,0.2,setosa
";

    #[test]
    fn test_run_from_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("iris.csv");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(RAW.as_bytes())
            .unwrap();
        let output = dir.path().join("out/clean.parquet");

        let prep = Preparation::new(PrepConfig {
            output: output.clone(),
            ..PrepConfig::default()
        });
        let report = prep.run(&DataSource::File(input)).unwrap();

        assert_eq!(report.original_rows, 9);
        assert_eq!(report.columns, 5);
        assert!(report.removed() >= 1);
        assert_eq!(report.bounds.len(), 4);
        assert_eq!(report.source.name, "iris.csv");

        let cleaned = read_parquet(&output).unwrap();
        assert_eq!(cleaned.row_count(), report.cleaned_rows);
        let widths = cleaned.numeric_values("sepal_width").unwrap();
        assert!(widths.iter().flatten().all(|w| *w < 9.0));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let prep = Preparation::new(PrepConfig {
            output: dir.path().join("clean.parquet"),
            ..PrepConfig::default()
        });
        let result = prep.run(&DataSource::File(dir.path().join("absent.csv")));
        assert!(matches!(result, Err(crate::IrisboardError::Io { .. })));
    }

    #[test]
    fn test_default_source() {
        assert_eq!(
            DataSource::default(),
            DataSource::Url(DEFAULT_DATA_URL.to_string())
        );
        assert_eq!(PrepConfig::default().output, PathBuf::from(DEFAULT_OUTPUT));
    }
}
