//! PDFVault admin console entry point.
//!
//! Loads configuration, initializes logging and runs one CLI command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pdfvault_cli::Cli;
use pdfvault_cli::output::error_hint;
use pdfvault_core::config::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::debug!(config = %cli.config, env = %cli.env, "Configuration loaded");

    if let Err(e) = cli.execute(config).await {
        eprintln!("Error: {e}");
        if let Some(hint) = error_hint(&e) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

/// Initialize tracing/logging on stderr, keeping stdout for command output.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
