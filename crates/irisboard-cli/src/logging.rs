//! Tracing subscriber setup.

use std::{io::IsTerminal, sync::Once};

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

static IRISBOARD_LOG_ENV_VAR: &str = "IRISBOARD_LOG";

/// Crates whose level follows `IRISBOARD_LOG` unless `RUST_LOG` names them.
const LOGGED_CRATES: &[&str] = &["irisboard", "irisboard_cli", "tower_http"];

/// Initializes a tracing subscriber writing to stderr.
///
/// `IRISBOARD_LOG` sets the level (default `info`, `debug` when verbose);
/// `RUST_LOG` directives take precedence per crate.
pub fn init(verbose: bool) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let (env_filter, log_level) = env_filter_and_log_level(verbose);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .init();

        tracing::debug!("log level: {}", log_level);
    });
}

fn env_filter_and_log_level(verbose: bool) -> (EnvFilter, String) {
    let directive_string = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(&directive_string);

    let default_level = if verbose { "debug" } else { "info" };
    let log_level =
        std::env::var(IRISBOARD_LOG_ENV_VAR).unwrap_or_else(|_| default_level.to_string());

    for crate_name in LOGGED_CRATES {
        if directive_string.contains(&format!("{crate_name}=")) {
            continue;
        }
        match format!("{crate_name}={log_level}").parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring {}={}: {}", IRISBOARD_LOG_ENV_VAR, log_level, e),
        }
    }

    (env_filter, log_level)
}
