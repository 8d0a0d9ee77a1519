//! Scatterplot matrix of the numeric columns, coloured by a categorical column.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use plotters::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{IrisboardError, Result};
use crate::input::DataTable;

static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
static CELL_SIZE: u32 = 180;
static POINT_SIZE: u32 = 2;
static HISTOGRAM_BINS: usize = 12;

/// Categorical palette, cycled when there are more groups than colours.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Colour assigned to one hue group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    /// Hex colour, e.g. `#1f77b4`.
    pub color: String,
}

/// A rendered scatterplot matrix.
#[derive(Debug, Clone)]
pub struct Pairplot {
    svg: String,
    legend: Vec<LegendEntry>,
}

impl Pairplot {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// The SVG as an inline `data:` URI for an `<img>` tag.
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}

/// Rows of one hue group, one optional value per plotted column.
struct Group {
    color: RGBColor,
    rows: Vec<Vec<Option<f64>>>,
}

/// Render every numeric column against every other.
///
/// Diagonal cells hold per-group histograms, the rest per-group scatter
/// plots. Rows with a missing hue value are not drawn.
pub fn render(table: &DataTable, hue: &str) -> Result<Pairplot> {
    let hue_index = table.column(hue)?.position;
    let columns: Vec<String> = table
        .schema
        .numeric_columns()
        .into_iter()
        .map(|c| c.name.clone())
        .collect();
    if columns.is_empty() {
        return Err(IrisboardError::InvalidInput(
            "table has no numeric columns to plot".to_string(),
        ));
    }

    let values = columns
        .iter()
        .map(|name| table.numeric_values(name))
        .collect::<Result<Vec<_>>>()?;

    let mut groups: IndexMap<String, Group> = IndexMap::new();
    for (row_index, row) in table.rows.iter().enumerate() {
        let label = match row.get(hue_index) {
            Some(value) if !value.is_missing() => value.to_string(),
            _ => continue,
        };
        let next_color = PALETTE[groups.len() % PALETTE.len()];
        groups
            .entry(label)
            .or_insert_with(|| Group {
                color: next_color,
                rows: Vec::new(),
            })
            .rows
            .push(values.iter().map(|column| column[row_index]).collect());
    }

    let ranges: Vec<(f64, f64)> = values.iter().map(|column| padded_range(column)).collect();
    let svg = draw(&columns, &ranges, &groups)?;

    debug!(
        columns = columns.len(),
        groups = groups.len(),
        bytes = svg.len(),
        "Rendered pairplot"
    );

    let legend = groups
        .iter()
        .map(|(label, group)| LegendEntry {
            label: label.clone(),
            color: hex(group.color),
        })
        .collect();

    Ok(Pairplot { svg, legend })
}

fn draw(
    columns: &[String],
    ranges: &[(f64, f64)],
    groups: &IndexMap<String, Group>,
) -> Result<String> {
    let k = columns.len();
    let side = CELL_SIZE * k as u32;
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (side, side)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        for (index, cell) in root.split_evenly((k, k)).iter().enumerate() {
            let (row, col) = (index / k, index % k);
            let (x_min, x_max) = ranges[col];

            let histograms = (row == col).then(|| histograms(col, ranges[col], groups));
            let y_range = match &histograms {
                Some(counts) => {
                    let peak = counts.iter().flatten().copied().fold(0.0, f64::max);
                    0.0..(peak * 1.1).max(1.0)
                }
                None => ranges[row].0..ranges[row].1,
            };

            let mut chart = ChartBuilder::on(cell)
                .margin(4)
                .set_label_area_size(LabelAreaPosition::Left, 32)
                .set_label_area_size(LabelAreaPosition::Bottom, 28)
                .build_cartesian_2d(x_min..x_max, y_range)
                .map_err(plot_error)?;

            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .x_labels(3)
                .y_labels(3)
                .label_style((DEFAULT_FONT, 9))
                .axis_desc_style((DEFAULT_FONT, 11))
                .x_label_formatter(&tick_label)
                .y_label_formatter(&tick_label);
            if row == k - 1 {
                mesh.x_desc(columns[col].as_str());
            }
            if col == 0 {
                mesh.y_desc(columns[row].as_str());
            }
            mesh.draw().map_err(plot_error)?;

            match histograms {
                Some(counts) => {
                    let width = (x_max - x_min) / HISTOGRAM_BINS as f64;
                    for (group, bins) in groups.values().zip(&counts) {
                        let style = group.color.mix(0.45).filled();
                        chart
                            .draw_series(bins.iter().enumerate().filter(|(_, c)| **c > 0.0).map(
                                |(bin, count)| {
                                    let x0 = x_min + bin as f64 * width;
                                    Rectangle::new([(x0, 0.0), (x0 + width, *count)], style)
                                },
                            ))
                            .map_err(plot_error)?;
                    }
                }
                None => {
                    for group in groups.values() {
                        let style = group.color.filled();
                        chart
                            .draw_series(group.rows.iter().filter_map(|values| {
                                match (values[col], values[row]) {
                                    (Some(x), Some(y)) => Some(Circle::new((x, y), POINT_SIZE, style)),
                                    _ => None,
                                }
                            }))
                            .map_err(plot_error)?;
                    }
                }
            }
        }

        root.present().map_err(plot_error)?;
    }

    Ok(svg)
}

/// Per-group bin counts of one column.
fn histograms(column: usize, (min, max): (f64, f64), groups: &IndexMap<String, Group>) -> Vec<Vec<f64>> {
    let width = (max - min) / HISTOGRAM_BINS as f64;
    groups
        .values()
        .map(|group| {
            let mut bins = vec![0.0; HISTOGRAM_BINS];
            for value in group.rows.iter().filter_map(|values| values[column]) {
                let bin = (((value - min) / width) as usize).min(HISTOGRAM_BINS - 1);
                bins[bin] += 1.0;
            }
            bins
        })
        .collect()
}

/// Observed range widened by 5% on each side; never empty.
fn padded_range(values: &[Option<f64>]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.05 } else { 0.5 };
    (min - pad, max + pad)
}

fn tick_label(value: &f64) -> String {
    format!("{:.1}", value)
}

fn hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

fn plot_error(err: impl std::fmt::Display) -> IrisboardError {
    IrisboardError::Plot(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, TableSchema, Value};

    fn flowers() -> DataTable {
        let schema = TableSchema::from_pairs([
            ("sepal_length", ColumnType::Float),
            ("petal_length", ColumnType::Float),
            ("species", ColumnType::String),
        ]);
        DataTable::new(
            schema,
            vec![
                vec![Value::Float(5.1), Value::Float(1.4), Value::from("setosa")],
                vec![Value::Float(4.9), Value::Float(1.3), Value::from("setosa")],
                vec![Value::Float(6.4), Value::Float(4.5), Value::from("versicolor")],
                vec![Value::Float(6.3), Value::Null, Value::from("virginica")],
            ],
        )
    }

    #[test]
    fn test_legend_follows_first_appearance() {
        let plot = render(&flowers(), "species").unwrap();
        let labels: Vec<&str> = plot.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
        assert_eq!(plot.legend()[0].color, "#1f77b4");
    }

    #[test]
    fn test_render_produces_svg_uri() {
        let plot = render(&flowers(), "species").unwrap();
        assert!(plot.svg().contains("<svg"));
        assert!(plot.data_uri().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_no_numeric_columns() {
        let schema = TableSchema::from_pairs([("species", ColumnType::String)]);
        let table = DataTable::new(schema, vec![vec![Value::from("setosa")]]);
        assert!(matches!(
            render(&table, "species"),
            Err(IrisboardError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_hue_column() {
        assert!(matches!(
            render(&flowers(), "genus"),
            Err(IrisboardError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_padded_range_constant_column() {
        assert_eq!(padded_range(&[Some(2.0), Some(2.0)]), (1.5, 2.5));
        assert_eq!(padded_range(&[None]), (0.0, 1.0));
    }
}
