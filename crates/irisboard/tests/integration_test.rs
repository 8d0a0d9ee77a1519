//! Integration tests for Irisboard.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use irisboard::{
    detect_outliers, load_table, read_parquet, remove_outliers, write_parquet, ColumnType,
    DataSource, FilterStrategy, IrisboardError, OutlierFilter, PrepConfig, Preparation,
    ReportRenderer,
};

/// Helper to create a temporary CSV file with given content.
fn create_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const IRIS_SAMPLE: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
4.7,3.2,1.3,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.4,3.2,4.5,1.5,versicolor
6.9,3.1,4.9,1.5,versicolor
6.3,3.3,6.0,2.5,virginica
5.8,2.7,5.1,1.9,virginica
7.1,3.0,5.9,2.1,virginica
5.0,2.0,3.5,1.0,versicolor
7.7,4.4,6.7,2.2,virginica
";

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_csv_infers_schema() {
    let file = create_csv(IRIS_SAMPLE);
    let table = load_table(file.path()).expect("Load failed");

    assert_eq!(table.row_count(), 11);
    assert_eq!(
        table.headers(),
        vec!["sepal_length", "sepal_width", "petal_length", "petal_width", "species"]
    );
    assert_eq!(table.schema.columns[0].column_type, ColumnType::Float);
    assert_eq!(table.schema.columns[4].column_type, ColumnType::String);
}

#[test]
fn test_load_unknown_file() {
    let dir = TempDir::new().unwrap();
    let result = load_table(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(IrisboardError::Io { .. })));
}

// =============================================================================
// Outlier Filtering
// =============================================================================

#[test]
fn test_remove_outliers_drops_extreme_sepal_widths() {
    let file = create_csv(IRIS_SAMPLE);
    let table = load_table(file.path()).unwrap();

    let cleaned = remove_outliers(&table).unwrap();
    let widths: Vec<f64> = cleaned
        .numeric_values("sepal_width")
        .unwrap()
        .into_iter()
        .flatten()
        .collect();

    assert!(cleaned.row_count() < table.row_count());
    assert!(!widths.contains(&2.0));
    assert!(!widths.contains(&4.4));
    assert_eq!(cleaned.headers(), table.headers());
}

#[test]
fn test_detect_leaves_input_untouched() {
    let file = create_csv(IRIS_SAMPLE);
    let table = load_table(file.path()).unwrap();
    let before = table.clone();

    let outliers = detect_outliers(&table).unwrap();

    assert_eq!(table, before);
    let widths = &outliers["sepal_width"];
    assert_eq!(widths.row_count(), 2);
    assert!(!outliers.contains_key("species"));
}

#[test]
fn test_strategies_share_bounds_on_first_column() {
    let file = create_csv(IRIS_SAMPLE);
    let table = load_table(file.path()).unwrap();

    let cumulative = OutlierFilter::new().filter(&table).unwrap();
    let independent = OutlierFilter::new()
        .with_strategy(FilterStrategy::Independent)
        .filter(&table)
        .unwrap();

    assert_eq!(cumulative.bounds[0], independent.bounds[0]);
    assert_eq!(
        cumulative.removed,
        table.row_count() - cumulative.table.row_count()
    );
}

// =============================================================================
// Storage
// =============================================================================

#[test]
fn test_cleaned_table_survives_parquet() {
    let file = create_csv(IRIS_SAMPLE);
    let table = load_table(file.path()).unwrap();
    let cleaned = remove_outliers(&table).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.parquet");
    write_parquet(&cleaned, &path).unwrap();

    let restored = read_parquet(&path).unwrap();
    assert_eq!(restored, cleaned);

    let by_extension = load_table(&path).unwrap();
    assert_eq!(by_extension, cleaned);
}

#[test]
fn test_preparation_then_report() {
    let file = create_csv(IRIS_SAMPLE);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("data/iris_data_clean.parquet");

    let prep = Preparation::new(PrepConfig {
        output: output.clone(),
        ..PrepConfig::default()
    });
    let report = prep
        .run(&DataSource::File(file.path().to_path_buf()))
        .unwrap();
    assert_eq!(report.original_rows, 11);
    assert_eq!(report.output, output);

    let cleaned = read_parquet(&output).unwrap();
    let renderer = ReportRenderer::new();

    let page = renderer.dataset(&cleaned).unwrap();
    assert!(page.contains("<h2>All Data</h2>"));
    assert!(page.contains("<td>setosa</td>"));

    let page = renderer.largest_petal_area(&cleaned).unwrap();
    assert!(page.contains("Largest Petal Surface per Species"));
}
