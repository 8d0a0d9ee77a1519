//! Outliers command - report what the IQR rule would flag.

use std::path::PathBuf;

use colored::Colorize;
use irisboard::{load_table, IqrBounds, OutlierFilter, Value};
use serde::Serialize;

/// Outliers of one column.
#[derive(Serialize)]
struct ColumnOutliers<'a> {
    column: &'a str,
    bounds: Option<&'a IqrBounds>,
    headers: Vec<&'a str>,
    rows: &'a [Vec<Value>],
}

pub fn run(
    file: PathBuf,
    multiplier: f64,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_table(&file)?;
    let filter = OutlierFilter::new().with_multiplier(multiplier);
    let bounds = filter.bounds(&table)?;
    let outliers = filter.detect(&table)?;

    let report: Vec<ColumnOutliers> = outliers
        .iter()
        .map(|(column, rows)| ColumnOutliers {
            column,
            bounds: bounds.iter().find(|b| &b.column == column),
            headers: rows.headers(),
            rows: &rows.rows,
        })
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, multiplier {})",
        "Outliers in".cyan().bold(),
        file.display().to_string().white(),
        table.row_count(),
        multiplier
    );

    for entry in &report {
        println!();
        let Some(bounds) = entry.bounds else {
            println!("{} {}", entry.column.white().bold(), "(no values)".dimmed());
            continue;
        };

        let count = entry.rows.len();
        let label = if count == 0 {
            "no outliers".green()
        } else {
            format!("{} outliers", count).yellow()
        };
        println!(
            "{} [{:.3}, {:.3}] {}",
            entry.column.white().bold(),
            bounds.lower,
            bounds.upper,
            label
        );

        if verbose {
            println!("  Q1 {:.3}, Q3 {:.3}, IQR {:.3}", bounds.q1, bounds.q3, bounds.iqr);
        }

        for row in entry.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            println!("  {}", cells.join("\t"));
        }
    }

    Ok(())
}
