//! Property-based tests for the outlier filter.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p irisboard --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p irisboard --test property_tests
//! ```

use proptest::prelude::*;

use irisboard::{
    detect_outliers, remove_outliers, ColumnType, DataTable, FilterStrategy, OutlierFilter,
    TableSchema, Value,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// A measurement, occasionally missing.
fn measurement() -> impl Strategy<Value = Value> {
    prop_oneof![
        9 => (0.0f64..100.0).prop_map(Value::Float),
        1 => Just(Value::Null),
    ]
}

fn species() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::from("setosa")),
        Just(Value::from("versicolor")),
        Just(Value::from("virginica")),
    ]
}

/// Tables with two numeric columns and one categorical column.
fn flower_table() -> impl Strategy<Value = DataTable> {
    prop::collection::vec((measurement(), measurement(), species()), 0..60).prop_map(|rows| {
        let schema = TableSchema::from_pairs([
            ("length", ColumnType::Float),
            ("width", ColumnType::Float),
            ("species", ColumnType::String),
        ]);
        let rows = rows.into_iter().map(|(a, b, s)| vec![a, b, s]).collect();
        DataTable::new(schema, rows)
    })
}

/// Coarse measurements so ties and zero-width fences are common.
fn grid_measurement() -> impl Strategy<Value = Value> {
    prop_oneof![
        8 => (0u8..24).prop_map(|v| Value::Float(f64::from(v) * 0.5)),
        1 => (40u8..60).prop_map(|v| Value::Float(f64::from(v))),
        1 => Just(Value::Null),
    ]
}

fn grid_table() -> impl Strategy<Value = DataTable> {
    prop::collection::vec(
        (grid_measurement(), grid_measurement(), grid_measurement()),
        0..40,
    )
    .prop_map(|rows| {
        let schema = TableSchema::from_pairs([
            ("a", ColumnType::Float),
            ("b", ColumnType::Float),
            ("c", ColumnType::Float),
        ]);
        let rows = rows.into_iter().map(|(a, b, c)| vec![a, b, c]).collect();
        DataTable::new(schema, rows)
    })
}

/// Linear interpolation at rank `p * (n - 1)` of a sorted, non-empty sample.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    if low + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[low] + (sorted[low + 1] - sorted[low]) * (rank - low as f64)
}

/// Straightforward column-by-column filter: each column's fences come from
/// the rows still present when that column is reached.
fn cumulative_survivors(table: &DataTable) -> Vec<usize> {
    let mut keep: Vec<usize> = (0..table.row_count()).collect();

    for column in 0..table.column_count() {
        let value_at = |row: usize| table.rows[row][column].as_f64();
        let mut sample: Vec<f64> = keep.iter().filter_map(|&row| value_at(row)).collect();
        if sample.is_empty() {
            keep.clear();
            continue;
        }
        sample.sort_by(f64::total_cmp);

        let q1 = quantile(&sample, 0.25);
        let q3 = quantile(&sample, 0.75);
        let iqr = q3 - q1;
        let (lower, upper) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        keep.retain(|&row| value_at(row).is_some_and(|v| lower <= v && v <= upper));
    }

    keep
}

/// True if `sub` is `full` with some rows deleted and the rest in order.
fn is_ordered_subset(sub: &DataTable, full: &DataTable) -> bool {
    let mut remaining = full.rows.iter();
    sub.rows
        .iter()
        .all(|row| remaining.any(|candidate| candidate == row))
}

// =============================================================================
// Filtering Invariants
// =============================================================================

proptest! {
    #[test]
    fn remove_never_adds_rows(table in flower_table()) {
        let cleaned = remove_outliers(&table).unwrap();
        prop_assert!(cleaned.row_count() <= table.row_count());
        prop_assert_eq!(&cleaned.schema, &table.schema);
    }

    #[test]
    fn remove_keeps_original_order(table in flower_table()) {
        let cleaned = remove_outliers(&table).unwrap();
        prop_assert!(is_ordered_subset(&cleaned, &table));
    }

    #[test]
    fn independent_keeps_original_order(table in flower_table()) {
        let cleaned = OutlierFilter::new()
            .with_strategy(FilterStrategy::Independent)
            .remove(&table)
            .unwrap();
        prop_assert!(is_ordered_subset(&cleaned, &table));
    }

    #[test]
    fn independent_survivors_within_input_bounds(table in flower_table()) {
        let filter = OutlierFilter::new().with_strategy(FilterStrategy::Independent);
        let bounds = filter.bounds(&table).unwrap();
        let cleaned = filter.remove(&table).unwrap();

        for bound in &bounds {
            for value in cleaned.numeric_values(&bound.column).unwrap() {
                let value = value.expect("rows with missing values are dropped");
                prop_assert!(bound.contains(value));
            }
        }
    }

    #[test]
    fn cumulative_filter_matches_column_by_column_model(table in grid_table()) {
        let cleaned = remove_outliers(&table).unwrap();
        let expected = table.select_rows(&cumulative_survivors(&table));
        prop_assert_eq!(cleaned, expected);
    }

    #[test]
    fn filter_reports_removed_count(table in flower_table()) {
        let outcome = OutlierFilter::new().filter(&table).unwrap();
        prop_assert_eq!(outcome.removed, table.row_count() - outcome.table.row_count());
    }

    #[test]
    fn constant_columns_keep_every_row(value in 0.0f64..100.0, rows in 1usize..40) {
        let schema = TableSchema::from_pairs([
            ("length", ColumnType::Float),
            ("species", ColumnType::String),
        ]);
        let table = DataTable::new(
            schema,
            (0..rows).map(|_| vec![Value::Float(value), Value::from("setosa")]).collect(),
        );
        let cleaned = remove_outliers(&table).unwrap();
        prop_assert_eq!(cleaned, table);
    }

    #[test]
    fn detect_is_pure(table in flower_table()) {
        let before = table.clone();
        let first = detect_outliers(&table).unwrap();
        let second = detect_outliers(&table).unwrap();
        prop_assert_eq!(&table, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn detected_rows_come_from_input(table in flower_table()) {
        for (_, outliers) in detect_outliers(&table).unwrap() {
            prop_assert!(is_ordered_subset(&outliers, &table));
        }
    }
}
