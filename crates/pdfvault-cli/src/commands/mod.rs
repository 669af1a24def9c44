//! CLI command definitions and dispatch.

pub mod analytics;
pub mod auth;
pub mod config;
pub mod folder;
pub mod pdf;
pub mod tag;
pub mod user;
pub mod watch;

use clap::{Parser, Subcommand};

use pdfvault_core::AppResult;
use pdfvault_core::config::AppConfig;

use crate::context::CliContext;
use crate::output::OutputFormat;

/// PDFVault admin console
#[derive(Debug, Parser)]
#[command(name = "pdfvault-admin", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in as an administrator
    Login(auth::LoginArgs),
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in administrator
    Whoami,
    /// Folder hierarchy and drive sync
    Folder(folder::FolderArgs),
    /// PDF management
    Pdf(pdf::PdfArgs),
    /// User management
    User(user::UserArgs),
    /// Access-tag management
    Tag(tag::TagArgs),
    /// Dashboard analytics
    Analytics,
    /// Stream realtime events until interrupted
    Watch(watch::WatchArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: AppConfig) -> AppResult<()> {
        let ctx = CliContext::new(app_config)?;
        match &self.command {
            Commands::Login(args) => auth::login(args, &ctx, self.format).await,
            Commands::Logout => auth::logout(&ctx).await,
            Commands::Whoami => auth::whoami(&ctx, self.format).await,
            Commands::Folder(args) => folder::execute(args, &ctx, self.format).await,
            Commands::Pdf(args) => pdf::execute(args, &ctx, self.format).await,
            Commands::User(args) => user::execute(args, &ctx, self.format).await,
            Commands::Tag(args) => tag::execute(args, &ctx, self.format).await,
            Commands::Analytics => analytics::execute(&ctx, self.format).await,
            Commands::Watch(args) => watch::execute(args, &ctx).await,
            Commands::Config(args) => config::execute(args, &ctx.config, self.format),
        }
    }
}

/// Ask for confirmation unless `yes` was passed.
pub(crate) fn confirm(prompt: &str, yes: bool) -> AppResult<bool> {
    if yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| pdfvault_core::AppError::internal(format!("Prompt failed: {e}")))
}
