//! In-memory typed table.

use serde::Serialize;

use crate::error::{IrisboardError, Result};
use crate::schema::{ColumnSchema, TableSchema, Value};

/// Parsed tabular data with an explicit schema.
///
/// Rows are stored row-major; `rows[i][j]` belongs to `schema.columns[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    /// Column schema, fixed at load time.
    pub schema: TableSchema,
    /// Row data.
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(schema: TableSchema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Create a table with no rows.
    pub fn empty(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.column_count()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in declaration order.
    pub fn headers(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&ColumnSchema> {
        self.schema
            .get_column(name)
            .ok_or_else(|| IrisboardError::ColumnNotFound(name.to_string()))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Null))
    }

    /// Numeric view of a column: `None` for missing cells.
    ///
    /// Fails if the column does not exist, is not numeric, or holds a
    /// non-numeric value.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.column(name)?;
        if !column.is_numeric() {
            return Err(IrisboardError::InvalidInput(format!(
                "column '{}' is {}, not numeric",
                name, column.column_type
            )));
        }

        let index = column.position;
        self.column_values(index)
            .enumerate()
            .map(|(row, value)| {
                if value.is_missing() {
                    Ok(None)
                } else {
                    value.as_f64().map(Some).ok_or_else(|| {
                        IrisboardError::InvalidInput(format!(
                            "column '{}' row {} holds {} value '{}'",
                            name,
                            row,
                            value.kind(),
                            value
                        ))
                    })
                }
            })
            .collect()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// New table holding the given rows, in the order given.
    pub fn select_rows(&self, indices: &[usize]) -> DataTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        DataTable::new(self.schema.clone(), rows)
    }

    /// New table with only the named columns, in the order given.
    pub fn select_columns(&self, names: &[&str]) -> Result<DataTable> {
        let sources = names
            .iter()
            .map(|name| self.column(name).map(|c| c.position))
            .collect::<Result<Vec<_>>>()?;

        let schema = TableSchema::from_pairs(
            sources
                .iter()
                .map(|&i| {
                    let column = &self.schema.columns[i];
                    (column.name.clone(), column.column_type)
                }),
        );
        let rows = self
            .rows
            .iter()
            .map(|row| {
                sources
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(DataTable::new(schema, rows))
    }

    /// Check that every row matches the schema width and that declared
    /// numeric columns only hold numbers or missing values.
    pub fn validate(&self) -> Result<()> {
        let width = self.schema.column_count();

        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(IrisboardError::InvalidInput(format!(
                    "row {} has {} values but the schema declares {} columns",
                    row_idx,
                    row.len(),
                    width
                )));
            }

            for (col_idx, column) in self.schema.columns.iter().enumerate() {
                if !column.is_numeric() {
                    continue;
                }
                let value = &row[col_idx];
                if !value.fits(column.column_type) {
                    return Err(IrisboardError::InvalidInput(format!(
                        "column '{}' is declared {} but row {} holds {} value '{}'",
                        column.name,
                        column.column_type,
                        row_idx,
                        value.kind(),
                        value
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check if a raw text value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn sample() -> DataTable {
        DataTable::new(
            TableSchema::from_pairs([
                ("sepal_width", ColumnType::Float),
                ("species", ColumnType::String),
            ]),
            vec![
                vec![Value::Float(3.5), Value::from("setosa")],
                vec![Value::Null, Value::from("versicolor")],
                vec![Value::Float(2.8), Value::from("virginica")],
            ],
        )
    }

    #[test]
    fn test_numeric_values() {
        let table = sample();
        let values = table.numeric_values("sepal_width").unwrap();
        assert_eq!(values, vec![Some(3.5), None, Some(2.8)]);
    }

    #[test]
    fn test_numeric_values_rejects_text_column() {
        let table = sample();
        assert!(matches!(
            table.numeric_values("species"),
            Err(IrisboardError::InvalidInput(_))
        ));
        assert!(matches!(
            table.numeric_values("petal_width"),
            Err(IrisboardError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_select_columns_reorders() {
        let table = sample();
        let reordered = table.select_columns(&["species", "sepal_width"]).unwrap();
        assert_eq!(reordered.headers(), vec!["species", "sepal_width"]);
        assert_eq!(reordered.schema.columns[1].position, 1);
        assert_eq!(reordered.get(0, 0), Some(&Value::from("setosa")));
    }

    #[test]
    fn test_validate_catches_text_in_numeric_column() {
        let mut table = sample();
        table.rows[1][0] = Value::from("wide");
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("sepal_width"));
    }

    #[test]
    fn test_validate_catches_ragged_rows() {
        let mut table = sample();
        table.rows[2].pop();
        assert!(matches!(
            table.validate(),
            Err(IrisboardError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("N/A"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("."));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("setosa"));
    }
}
