//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use irisboard::FilterStrategy;

/// Irisboard: outlier cleaning and reporting for the Iris dataset
#[derive(Parser)]
#[command(name = "irisboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download or read raw data, remove outliers and write Parquet
    Prep {
        /// URL of the raw CSV (default: public Iris dataset)
        #[arg(long, conflicts_with = "input")]
        url: Option<String>,

        /// Local CSV/TSV file to read instead of downloading
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output Parquet file
        #[arg(short, long, default_value = irisboard::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// IQR multiplier for the outlier fences
        #[arg(short, long, default_value = "1.5")]
        multiplier: f64,

        /// Column filtering strategy (cumulative, independent)
        #[arg(short, long, default_value = "cumulative")]
        strategy: FilterStrategy,
    },

    /// Serve the report pages for a cleaned dataset
    Serve {
        /// Cleaned dataset (Parquet, CSV or TSV)
        #[arg(value_name = "DATA", default_value = irisboard::DEFAULT_OUTPUT)]
        data: PathBuf,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Open the index page in a browser
        #[arg(long)]
        open: bool,
    },

    /// Report outliers per numeric column without removing them
    Outliers {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// IQR multiplier for the outlier fences
        #[arg(short, long, default_value = "1.5")]
        multiplier: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
