//! CSV/TSV parser with delimiter detection and column type inference.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::source::SourceMetadata;
use super::table::DataTable;
use crate::error::{IrisboardError, Result};
use crate::schema::{ColumnType, TableSchema, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into typed tables.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| IrisboardError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse_slice(&contents, &path.display().to_string())
    }

    /// Download a remote file and parse it.
    pub fn parse_url(&self, url: &str) -> Result<(DataTable, SourceMetadata)> {
        let contents = super::fetch(url)?;
        self.parse_slice(&contents, url)
    }

    /// Parse raw bytes; `location` is recorded in the metadata.
    pub fn parse_slice(&self, contents: &[u8], location: &str) -> Result<(DataTable, SourceMetadata)> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(contents)?,
        };

        let table = self.parse_bytes(contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        };

        debug!(
            location,
            format,
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed delimited data"
        );

        let metadata = SourceMetadata::new(
            location,
            contents,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes with a known delimiter.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        // Without a header row this is the first data record, which
        // `records()` still yields.
        let first = reader.headers()?.clone();
        let headers: Vec<String> = if self.config.has_header {
            first.iter().map(|s| s.trim().to_string()).collect()
        } else {
            (0..first.len()).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(IrisboardError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut raw_rows: Vec<Vec<String>> = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad row if needed
            while row.len() < expected_cols {
                row.push(String::new());
            }
            // Truncate if too many columns
            row.truncate(expected_cols);

            raw_rows.push(row);
        }

        let types: Vec<ColumnType> = (0..expected_cols)
            .map(|col| infer_column_type(raw_rows.iter().map(|row| row[col].as_str())))
            .collect();

        let rows = raw_rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row.iter()
                    .zip(&types)
                    .enumerate()
                    .map(|(col_idx, (raw, &column_type))| {
                        convert_value(raw, column_type).ok_or_else(|| IrisboardError::Parse {
                            row: row_idx + 1,
                            column: col_idx + 1,
                            message: format!("'{}' is not a valid {}", raw, column_type),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let schema = TableSchema::from_pairs(headers.into_iter().zip(types));
        Ok(DataTable::new(schema, rows))
    }
}

/// Infer a column type from its raw values.
///
/// The type must fit every non-null value; a column without values is text.
fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;
    let mut seen = false;

    for value in values.filter(|v| !DataTable::is_null_value(v)) {
        seen = true;
        let trimmed = value.trim();
        all_integer &= trimmed.parse::<i64>().is_ok();
        all_float &= trimmed.parse::<f64>().is_ok();
        all_boolean &= parse_boolean(trimmed).is_some();

        if !all_integer && !all_float && !all_boolean {
            return ColumnType::String;
        }
    }

    if !seen {
        ColumnType::String
    } else if all_integer {
        ColumnType::Integer
    } else if all_float {
        ColumnType::Float
    } else if all_boolean {
        ColumnType::Boolean
    } else {
        ColumnType::String
    }
}

/// Convert a raw value to the column's declared type.
fn convert_value(raw: &str, column_type: ColumnType) -> Option<Value> {
    if column_type != ColumnType::String && DataTable::is_null_value(raw) {
        return Some(Value::Null);
    }

    let trimmed = raw.trim();
    match column_type {
        ColumnType::Integer => trimmed.parse().ok().map(Value::Integer),
        ColumnType::Float => trimmed.parse().ok().map(Value::Float),
        ColumnType::Boolean => parse_boolean(trimmed).map(Value::Boolean),
        ColumnType::String if DataTable::is_null_value(raw) => Some(Value::Null),
        ColumnType::String => Some(Value::Text(raw.to_string())),
    }
}

fn parse_boolean(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(IrisboardError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab breaks ties
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
