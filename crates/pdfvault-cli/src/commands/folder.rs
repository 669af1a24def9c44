//! Folder CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use pdfvault_core::AppResult;
use pdfvault_core::traits::NotificationChannel;
use pdfvault_service::folder::{FolderEdit, FolderSnapshot, SyncReport, render_tree_lines};

use crate::context::CliContext;
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the drive folder hierarchy from the local cache
    Tree {
        /// Sync with the drive first
        #[arg(long)]
        sync: bool,
    },
    /// List folders stored by the backend
    List,
    /// Sync the drive folder listing into the local cache
    Sync {
        /// Do not announce the sync on the realtime channel
        #[arg(long)]
        quiet: bool,
    },
    /// List the files in a drive folder
    Pdfs {
        /// Drive folder ID
        folder_id: String,
    },
    /// Rename a folder or change its description
    Rename {
        /// Folder ID
        folder_id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    id: String,
    name: String,
    description: String,
    created: String,
}

#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    id: String,
    name: String,
}

/// Execute folder commands
pub async fn execute(args: &FolderArgs, ctx: &CliContext, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        FolderCommand::Tree { sync } => {
            let snapshot = if *sync {
                let service = ctx.folder_sync(None);
                let report = service.sync().await?;
                if format == OutputFormat::Table {
                    print_report(&report);
                }
                service.view().snapshot().await
            } else {
                ctx.folder_sync(None).load_cached().await?
            };
            print_tree(&snapshot, format);
        }
        FolderCommand::List => {
            let rows: Vec<FolderRow> = ctx
                .folders()
                .list()
                .await?
                .into_iter()
                .map(|f| FolderRow {
                    id: f.id,
                    name: f.name,
                    description: output::or_dash(f.description),
                    created: output::or_dash(f.created_at.map(|t| t.format("%Y-%m-%d"))),
                })
                .collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Sync { quiet } => {
            let channel = if *quiet || !ctx.config.drive.announce_sync {
                None
            } else {
                connect_channel(ctx).await
            };
            let report = ctx.folder_sync(channel.clone()).sync().await?;
            if let Some(channel) = channel {
                let _ = channel.disconnect().await;
            }
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => print_report(&report),
            }
        }
        FolderCommand::Pdfs { folder_id } => {
            let files = ctx.folders().pdfs_in(folder_id).await?;
            match format {
                OutputFormat::Json => output::print_json(&files),
                OutputFormat::Table => {
                    let rows: Vec<FileRow> = files
                        .iter()
                        .map(|f| FileRow {
                            id: text(f, &["id", "_id"]),
                            name: text(f, &["name", "title"]),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }
        }
        FolderCommand::Rename {
            folder_id,
            name,
            description,
        } => {
            let folder = ctx
                .folders()
                .update(
                    folder_id,
                    FolderEdit {
                        name: name.clone(),
                        description: description.clone(),
                    },
                )
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => {
                    output::print_success(&format!("Folder '{}' updated", folder.name))
                }
            }
        }
    }
    Ok(())
}

async fn connect_channel(ctx: &CliContext) -> Option<Arc<pdfvault_realtime::WsChannel>> {
    let connected = match ctx.channel() {
        Ok(channel) => channel.connect().await.map(|()| Arc::new(channel)),
        Err(e) => Err(e),
    };
    match connected {
        Ok(channel) => Some(channel),
        Err(e) => {
            warn!(error = %e, "Realtime channel unavailable, sync will not be announced");
            None
        }
    }
}

fn text(value: &serde_json::Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .unwrap_or("-")
        .to_string()
}

fn print_report(report: &SyncReport) {
    let summary = &report.summary;
    output::print_success(&format!(
        "Synced {} folders: {} added, {} updated, {} removed",
        summary.total, summary.added, summary.updated, summary.removed
    ));
    if report.backend_refreshed {
        output::print_kv("Backend drive cache", "refreshed");
    }
    if report.announced {
        output::print_kv("Realtime", "announced");
    }
}

fn print_tree(snapshot: &FolderSnapshot, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(&snapshot.tree),
        OutputFormat::Table => {
            if snapshot.tree.is_empty() {
                println!("No folders cached. Run `pdfvault-admin folder sync` first.");
                return;
            }
            for line in render_tree_lines(&snapshot.tree) {
                println!("{line}");
            }
            let synced = snapshot
                .synced_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string());
            println!(
                "\n{} folders, synced {}",
                snapshot.tree.total_folders,
                output::or_dash(synced)
            );
        }
    }
}
