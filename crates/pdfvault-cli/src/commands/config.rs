//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use pdfvault_core::AppResult;
use pdfvault_core::config::AppConfig;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => {
                output::print_kv("API", &config.api.base_url);
                output::print_kv("Token file", &config.api.token_file);
                output::print_kv("Page size", &config.api.page_size.to_string());
                output::print_kv(
                    "Drive root",
                    &output::or_dash(config.drive.base_folder_id.as_deref()),
                );
                output::print_kv("Folder cache", &config.cache.folder_cache_path);
                output::print_kv("Realtime", &config.realtime.url);
                output::print_kv(
                    "Logging",
                    &format!("{} ({})", config.logging.level, config.logging.format),
                );
                output::print_kv(
                    "Tag categories",
                    &config
                        .catalog
                        .categories
                        .iter()
                        .map(|c| c.value.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
        },
    }
    Ok(())
}
