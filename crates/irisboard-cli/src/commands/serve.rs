//! Serve command - host the report pages for a cleaned dataset.

use std::path::PathBuf;

use colored::Colorize;
use irisboard::load_table;

use crate::server::{app, state::AppState, ServerConfig};

pub fn run(
    data: PathBuf,
    host: String,
    port: u16,
    open: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !data.exists() {
        return Err(format!(
            "Dataset not found: {}\nRun 'irisboard prep' first.",
            data.display()
        )
        .into());
    }

    let table = load_table(&data)?;
    if verbose {
        println!(
            "Loaded {} rows, {} columns from {}",
            table.row_count(),
            table.column_count(),
            data.display()
        );
    }

    let state = AppState::new(table);
    let config = ServerConfig { host, port };

    let url = config.url();
    println!();
    println!(
        "{} {}",
        "Starting report server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data: {}", data.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &config))?;

    println!("{}", "Server stopped.".yellow());
    Ok(())
}
