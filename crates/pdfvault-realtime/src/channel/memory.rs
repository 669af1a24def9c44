//! In-process notification channel.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use pdfvault_core::events::RealtimeEvent;
use pdfvault_core::traits::NotificationChannel;
use pdfvault_core::{AppError, AppResult};

/// A channel that never leaves the process.
///
/// Events passed to [`push`](Self::push) play the role of server pushes;
/// events passed to [`emit`](NotificationChannel::emit) are recorded and
/// can be inspected with [`emitted`](Self::emitted).
#[derive(Debug)]
pub struct MemoryChannel {
    /// Whether the channel is open.
    connected: AtomicBool,
    /// Server → client fan-out.
    inbound: broadcast::Sender<RealtimeEvent>,
    /// Client → server log.
    outbound: RwLock<Vec<RealtimeEvent>>,
}

impl MemoryChannel {
    /// Create a closed channel.
    pub fn new(buffer_size: usize) -> Self {
        let (inbound, _) = broadcast::channel(buffer_size.max(1));
        Self {
            connected: AtomicBool::new(false),
            inbound,
            outbound: RwLock::new(Vec::new()),
        }
    }

    /// Deliver `event` to subscribers as if the server had sent it.
    ///
    /// Returns the number of subscribers reached; nothing is delivered
    /// while the channel is closed.
    pub fn push(&self, event: RealtimeEvent) -> usize {
        if !self.is_connected() {
            debug!(event = %event.event, "Dropping push on closed memory channel");
            return 0;
        }
        self.inbound.send(event).unwrap_or(0)
    }

    /// Every event emitted so far, oldest first.
    pub async fn emitted(&self) -> Vec<RealtimeEvent> {
        self.outbound.read().await.clone()
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl NotificationChannel for MemoryChannel {
    async fn connect(&self) -> AppResult<()> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> AppResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn emit(&self, event: RealtimeEvent) -> AppResult<()> {
        if !self.is_connected() {
            warn!(event = %event.event, "Realtime channel not connected, event not sent");
            return Err(AppError::service_unavailable(format!(
                "Realtime channel not connected; '{}' was not sent",
                event.event
            )));
        }
        self.outbound.write().await.push(event);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.inbound.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use pdfvault_core::error::ErrorKind;
    use pdfvault_core::events::EventName;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_emit_requires_connection() {
        let channel = MemoryChannel::default();
        let event = RealtimeEvent::new(EventName::AdminFolderUpdate, json!({}));

        let err = channel.emit(event.clone()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);

        channel.connect().await.unwrap();
        channel.emit(event.clone()).await.unwrap();
        assert_eq!(channel.emitted().await, vec![event]);
    }

    #[tokio::test]
    async fn test_push_reaches_subscribers_only_when_open() {
        let channel = MemoryChannel::default();
        let mut rx = channel.subscribe();
        let event = RealtimeEvent::new(EventName::PdfUpdated, json!({"id": "p1"}));

        assert_eq!(channel.push(event.clone()), 0);
        channel.connect().await.unwrap();
        assert_eq!(channel.push(event.clone()), 1);
        assert_eq!(rx.recv().await.unwrap(), event);

        channel.disconnect().await.unwrap();
        assert!(!channel.is_connected());
    }
}
