//! Parquet storage for cleaned tables.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use super::table::DataTable;
use crate::error::{IrisboardError, Result};
use crate::schema::{ColumnType, TableSchema, Value};

/// Index columns written by dataframe libraries; not part of the data.
const INDEX_COLUMN_PREFIX: &str = "__index_level_";

/// Write a table to a Snappy-compressed Parquet file.
///
/// Parent directories are created as needed.
pub fn write_parquet(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    table.validate()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IrisboardError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let fields: Vec<Field> = table
        .schema
        .columns
        .iter()
        .map(|c| Field::new(c.name.as_str(), arrow_type(c.column_type), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays = table
        .schema
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| build_array(table, index, column.column_type, &column.name))
        .collect::<Result<Vec<_>>>()?;

    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path).map_err(|e| IrisboardError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    debug!(path = %path.display(), rows = table.row_count(), "wrote parquet file");
    Ok(())
}

/// Read a Parquet file into a table.
///
/// Float columns become `Float`, integer columns `Integer`, boolean columns
/// `Boolean` and string (or string dictionary) columns `String`.
pub fn read_parquet(path: impl AsRef<Path>) -> Result<DataTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IrisboardError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let arrow_schema = builder.schema().clone();

    // (arrow index, name, type) of every data column
    let mut selected = Vec::new();
    for (index, field) in arrow_schema.fields().iter().enumerate() {
        if field.name().starts_with(INDEX_COLUMN_PREFIX) {
            continue;
        }
        let column_type = column_type_for(field.data_type()).ok_or_else(|| {
            IrisboardError::UnsupportedFormat(format!(
                "column '{}' has unsupported type {:?}",
                field.name(),
                field.data_type()
            ))
        })?;
        selected.push((index, field.name().clone(), column_type));
    }

    let schema = TableSchema::from_pairs(
        selected
            .iter()
            .map(|(_, name, column_type)| (name.clone(), *column_type)),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for batch in builder.build()? {
        let batch = batch?;
        let mut columns = selected
            .iter()
            .map(|(index, _, column_type)| array_values(batch.column(*index), *column_type))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(Vec::into_iter)
            .collect::<Vec<_>>();

        for _ in 0..batch.num_rows() {
            rows.push(
                columns
                    .iter_mut()
                    .map(|column| column.next().unwrap_or(Value::Null))
                    .collect(),
            );
        }
    }

    debug!(path = %path.display(), rows = rows.len(), "read parquet file");
    Ok(DataTable::new(schema, rows))
}

fn arrow_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Integer => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Boolean => DataType::Boolean,
        ColumnType::String => DataType::Utf8,
    }
}

fn column_type_for(data_type: &DataType) -> Option<ColumnType> {
    match data_type {
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(ColumnType::Float),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Some(ColumnType::Integer),
        DataType::Boolean => Some(ColumnType::Boolean),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Some(ColumnType::String),
        DataType::Dictionary(_, value) => match value.as_ref() {
            DataType::Utf8 | DataType::LargeUtf8 => Some(ColumnType::String),
            _ => None,
        },
        _ => None,
    }
}

fn build_array(
    table: &DataTable,
    index: usize,
    column_type: ColumnType,
    name: &str,
) -> Result<ArrayRef> {
    let mismatch = |value: &Value| {
        IrisboardError::InvalidInput(format!(
            "column '{}' is declared {} but holds {} value '{}'",
            name,
            column_type,
            value.kind(),
            value
        ))
    };

    let array: ArrayRef = match column_type {
        ColumnType::Integer => {
            let values = table
                .column_values(index)
                .map(|value| match value {
                    value if value.is_missing() => Ok(None),
                    Value::Integer(i) => Ok(Some(*i)),
                    Value::Float(f) if f.fract() == 0.0 => Ok(Some(*f as i64)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Arc::new(Int64Array::from(values))
        }
        ColumnType::Float => {
            let values = table
                .column_values(index)
                .map(|value| match value {
                    Value::Null => Ok(None),
                    Value::Integer(i) => Ok(Some(*i as f64)),
                    Value::Float(f) => Ok(Some(*f)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Arc::new(Float64Array::from(values))
        }
        ColumnType::Boolean => {
            let values = table
                .column_values(index)
                .map(|value| match value {
                    Value::Null => Ok(None),
                    Value::Boolean(b) => Ok(Some(*b)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Arc::new(BooleanArray::from(values))
        }
        ColumnType::String => {
            let values: Vec<Option<String>> = table
                .column_values(index)
                .map(|value| match value {
                    Value::Null => None,
                    Value::Text(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Arc::new(StringArray::from(values))
        }
    };

    Ok(array)
}

fn array_values(array: &ArrayRef, column_type: ColumnType) -> Result<Vec<Value>> {
    let values = match column_type {
        ColumnType::Float => {
            let casted = cast(array, &DataType::Float64)?;
            let floats = casted.as_primitive::<Float64Type>();
            (0..floats.len())
                .map(|i| {
                    if floats.is_null(i) {
                        Value::Null
                    } else {
                        Value::Float(floats.value(i))
                    }
                })
                .collect()
        }
        ColumnType::Integer => {
            let casted = cast(array, &DataType::Int64)?;
            let ints = casted.as_primitive::<Int64Type>();
            (0..ints.len())
                .map(|i| {
                    if ints.is_null(i) {
                        Value::Null
                    } else {
                        Value::Integer(ints.value(i))
                    }
                })
                .collect()
        }
        ColumnType::Boolean => {
            let bools = array.as_boolean();
            (0..bools.len())
                .map(|i| {
                    if bools.is_null(i) {
                        Value::Null
                    } else {
                        Value::Boolean(bools.value(i))
                    }
                })
                .collect()
        }
        ColumnType::String => {
            let casted = cast(array, &DataType::Utf8)?;
            let strings = casted.as_string::<i32>();
            (0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        Value::Null
                    } else {
                        Value::Text(strings.value(i).to_string())
                    }
                })
                .collect()
        }
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_types_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clean.parquet");

        let table = DataTable::new(
            TableSchema::from_pairs([
                ("sepal_width", ColumnType::Float),
                ("count", ColumnType::Integer),
                ("species", ColumnType::String),
            ]),
            vec![
                vec![Value::Float(3.5), Value::Integer(1), Value::from("setosa")],
                vec![Value::Null, Value::Integer(2), Value::Null],
            ],
        );

        write_parquet(&table, &path).unwrap();
        let loaded = read_parquet(&path).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_nan_in_integer_column_is_written_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.parquet");

        let table = DataTable::new(
            TableSchema::from_pairs([("count", ColumnType::Integer)]),
            vec![
                vec![Value::Integer(4)],
                vec![Value::Float(f64::NAN)],
                vec![Value::Float(7.0)],
            ],
        );

        write_parquet(&table, &path).unwrap();
        let loaded = read_parquet(&path).unwrap();

        assert_eq!(loaded.schema.columns[0].column_type, ColumnType::Integer);
        assert_eq!(
            loaded.rows,
            vec![
                vec![Value::Integer(4)],
                vec![Value::Null],
                vec![Value::Integer(7)],
            ]
        );
    }

    #[test]
    fn test_write_rejects_text_in_numeric_column() {
        let dir = tempfile::tempdir().unwrap();
        let table = DataTable::new(
            TableSchema::from_pairs([("sepal_width", ColumnType::Float)]),
            vec![vec![Value::from("wide")]],
        );

        let result = write_parquet(&table, dir.path().join("bad.parquet"));
        assert!(matches!(result, Err(IrisboardError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_parquet("does/not/exist.parquet");
        assert!(matches!(result, Err(IrisboardError::Io { .. })));
    }
}
