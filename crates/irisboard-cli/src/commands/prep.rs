//! Prep command - load raw data, remove outliers, write Parquet.

use std::path::PathBuf;

use colored::Colorize;
use irisboard::{DataSource, FilterStrategy, OutlierFilter, PrepConfig, Preparation};

pub fn run(
    url: Option<String>,
    input: Option<PathBuf>,
    output: PathBuf,
    multiplier: f64,
    strategy: FilterStrategy,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = match (input, url) {
        (Some(path), _) => DataSource::File(path),
        (None, Some(url)) => DataSource::Url(url),
        (None, None) => DataSource::default(),
    };

    let config = PrepConfig {
        filter: OutlierFilter::new()
            .with_multiplier(multiplier)
            .with_strategy(strategy),
        output,
        ..PrepConfig::default()
    };

    println!("{} {}", "Loading".cyan().bold(), source.to_string().white());

    let report = Preparation::new(config).run(&source)?;

    println!();
    println!(
        "Original data shape: ({}, {})",
        report.original_rows, report.source.column_count
    );
    println!(
        "Data shape after removing outliers: ({}, {})",
        report.cleaned_rows, report.columns
    );
    println!(
        "Removed {} rows ({} strategy, multiplier {})",
        report.removed().to_string().yellow().bold(),
        strategy,
        multiplier
    );

    if !report.bounds.is_empty() {
        println!();
        println!("{}", "Bounds:".white().bold());
        for bounds in &report.bounds {
            println!(
                "  {:<16} [{:>8.3}, {:>8.3}]  (Q1 {:.3}, Q3 {:.3}, IQR {:.3})",
                bounds.column, bounds.lower, bounds.upper, bounds.q1, bounds.q3, bounds.iqr
            );
        }
    }

    if verbose {
        println!();
        println!("  Source: {}", report.source.location);
        println!("  SHA-256: {}", report.source.hash);
        println!("  Format: {}", report.source.format);
    }

    println!();
    println!(
        "{} {}",
        "✓ Cleaned data written to".green().bold(),
        report.output.display()
    );

    Ok(())
}
