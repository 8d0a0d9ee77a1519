//! Table contexts for the HTML templates.

use serde::Serialize;

use crate::analysis::{ColumnSummary, GroupSummary, PetalAreaLeader};
use crate::input::DataTable;

/// Shared stylesheet for every page.
pub const CSS_STYLES: &str = r#"
    body {
        font-family: 'Helvetica', sans-serif;
        background-color: #f4f4f9;
        text-align: left;
    }
    h1, h2 {
        color: #4CAF50;
    }
    ul {
        list-style-type: none;
        padding: 0;
    }
    li {
        font-size: 18px;
        margin-bottom: 10px;
    }
    a {
        text-decoration: none;
        color: #4CAF50;
        font-weight: bold;
    }
    a:hover {
        color: #333;
    }
    table {
        width: 90%;
        margin: 20px auto;
        border-collapse: collapse;
        box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
        background-color: white;
    }
    th, td {
        padding: 10px;
        text-align: center;
        border: 1px solid #ddd;
    }
    th {
        background-color: #4CAF50;
        color: white;
        text-transform: uppercase;
    }
    tr:nth-child(even) {
        background-color: #f9f9f9;
    }
    tr:hover {
        background-color: #e1f1e1;
    }
"#;

/// Column headers of the summary statistics tables.
const STAT_HEADERS: [&str; 7] = ["mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HeaderCell {
    label: String,
    emphasized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Cell {
    value: String,
    emphasized: bool,
}

impl Cell {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            emphasized: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HtmlRow {
    indexed: bool,
    label: String,
    cells: Vec<Cell>,
}

/// Template context of one HTML table.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HtmlTable {
    indexed: bool,
    index_label: String,
    headers: Vec<HeaderCell>,
    rows: Vec<HtmlRow>,
}

impl HtmlTable {
    fn new(headers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            indexed: true,
            index_label: String::new(),
            headers: headers
                .into_iter()
                .map(|label| HeaderCell {
                    label: label.into(),
                    emphasized: false,
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, label: impl Into<String>, cells: Vec<Cell>) {
        self.rows.push(HtmlRow {
            indexed: self.indexed,
            label: label.into(),
            cells,
        });
    }

    /// Rows of a data table, labelled from `first_label` upwards.
    ///
    /// Header and cells of `emphasized` are rendered bold.
    pub(crate) fn from_table(table: &DataTable, first_label: usize, emphasized: Option<&str>) -> Self {
        let mut html = Self::new(table.headers());
        for header in &mut html.headers {
            header.emphasized = Some(header.label.as_str()) == emphasized;
        }
        let flags: Vec<bool> = html.headers.iter().map(|h| h.emphasized).collect();

        for (offset, row) in table.rows.iter().enumerate() {
            let cells = row
                .iter()
                .zip(&flags)
                .map(|(value, &emphasized)| Cell {
                    value: value.to_string(),
                    emphasized,
                })
                .collect();
            html.push_row((first_label + offset).to_string(), cells);
        }

        html
    }

    /// One row per numeric column; count is left out.
    pub(crate) fn from_summaries(summaries: &[ColumnSummary]) -> Self {
        let mut html = Self::new(STAT_HEADERS);
        for summary in summaries {
            html.push_row(summary.column.clone(), stat_cells(summary));
        }
        html
    }

    /// One row per (species, column) pair.
    pub(crate) fn from_group_summaries(summaries: &[GroupSummary]) -> Self {
        let mut html = Self::new(["species", "stat", "count"].into_iter().chain(STAT_HEADERS));
        for (index, group) in summaries.iter().enumerate() {
            let mut cells = vec![
                Cell::plain(group.group.clone()),
                Cell::plain(group.summary.column.clone()),
                Cell::plain(group.summary.count.to_string()),
            ];
            cells.extend(stat_cells(&group.summary));
            html.push_row(index.to_string(), cells);
        }
        html
    }

    pub(crate) fn from_leaders(leaders: &[PetalAreaLeader]) -> Self {
        let mut html = Self::new(["species", "petal_area", "petal_length", "petal_width"]);
        for (index, leader) in leaders.iter().enumerate() {
            html.push_row(
                index.to_string(),
                vec![
                    Cell::plain(leader.species.clone()),
                    Cell::plain(format!("{:.2}", leader.petal_area)),
                    Cell::plain(format_measure(leader.petal_length)),
                    Cell::plain(format_measure(leader.petal_width)),
                ],
            );
        }
        html
    }
}

fn stat_cells(summary: &ColumnSummary) -> Vec<Cell> {
    [
        summary.mean,
        summary.std,
        summary.min,
        summary.q1,
        summary.median,
        summary.q3,
        summary.max,
    ]
    .into_iter()
    .map(|v| Cell::plain(format_stat(v)))
    .collect()
}

/// Six decimals, `NaN` when undefined.
pub(crate) fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

/// Measurements keep at least one decimal.
fn format_measure(value: f64) -> String {
    crate::schema::Value::Float(value).to_string()
}
