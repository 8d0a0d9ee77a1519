//! Irisboard CLI - clean the Iris dataset and serve reports on it.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Prep {
            url,
            input,
            output,
            multiplier,
            strategy,
        } => commands::prep::run(url, input, output, multiplier, strategy, cli.verbose),

        Commands::Serve {
            data,
            host,
            port,
            open,
        } => commands::serve::run(data, host, port, open, cli.verbose),

        Commands::Outliers {
            file,
            multiplier,
            json,
        } => commands::outliers::run(file, multiplier, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
