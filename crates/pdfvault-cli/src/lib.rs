//! # pdfvault-cli
//!
//! The `pdfvault-admin` command line: one subcommand group per admin
//! screen (folders, PDFs, users, access tags, analytics) plus login,
//! realtime event watching and configuration display.

pub mod commands;
pub mod context;
pub mod output;

pub use commands::Cli;
pub use context::CliContext;
