//! Table-level schema definition.

use serde::{Deserialize, Serialize};

use super::column::ColumnSchema;
use super::types::ColumnType;

/// Ordered list of typed columns for an entire table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Schemas for each column, in declaration order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a new empty table schema.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Create a table schema with the given columns.
    pub fn with_columns(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    /// Build a schema from `(name, type)` pairs, assigning positions in order.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, ColumnType)>) -> Self {
        let columns = pairs
            .into_iter()
            .enumerate()
            .map(|(position, (name, column_type))| ColumnSchema::new(name, position, column_type))
            .collect();
        Self { columns }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the position of a column by name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Numeric columns in declaration order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.is_numeric())
    }
}
