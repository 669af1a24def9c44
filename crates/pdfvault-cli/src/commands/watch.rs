//! Realtime event streaming.

use std::sync::Arc;

use clap::Args;
use tracing::info;

use pdfvault_core::events::{EventName, RealtimeEvent};
use pdfvault_core::traits::NotificationChannel;
use pdfvault_core::{AppError, AppResult};
use pdfvault_realtime::EventDispatcher;

use crate::context::CliContext;

/// Arguments for `watch`
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Event names to print; defaults to all server events
    #[arg(short, long)]
    pub event: Vec<String>,
}

/// Print realtime events until Ctrl-C.
pub async fn execute(args: &WatchArgs, ctx: &CliContext) -> AppResult<()> {
    let events: Vec<String> = if args.event.is_empty() {
        [
            EventName::FolderUpdated,
            EventName::AccessTagUpdated,
            EventName::PdfUpdated,
        ]
        .iter()
        .map(|e| e.as_str().to_string())
        .collect()
    } else {
        args.event.clone()
    };

    let channel = ctx.channel()?;
    channel.connect().await?;

    let dispatcher = Arc::new(EventDispatcher::new());
    for name in &events {
        dispatcher.on(name, print_event);
    }
    let pump = dispatcher.clone().run(channel.subscribe());
    info!(events = ?events, "Watching realtime events");
    println!("Watching {} (Ctrl-C to stop)", events.join(", "));

    let interrupted = tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for Ctrl-C: {e}")));

    pump.abort();
    channel.disconnect().await?;
    interrupted
}

fn print_event(event: &RealtimeEvent) {
    println!(
        "{} {} {}",
        chrono::Utc::now().format("%H:%M:%S"),
        event.event,
        event.data
    );
}
