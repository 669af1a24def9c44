//! Realtime notification channel trait.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::events::RealtimeEvent;
use crate::result::AppResult;

/// A bidirectional realtime channel to the notification server.
///
/// The channel has an explicit lifecycle: nothing is sent or received
/// before [`connect`](Self::connect) or after
/// [`disconnect`](Self::disconnect). Implementations are constructed with
/// their configuration and handed to whoever needs them.
#[async_trait]
pub trait NotificationChannel: Send + Sync + std::fmt::Debug + 'static {
    /// Open the channel. Connecting an already-open channel is a no-op.
    async fn connect(&self) -> AppResult<()>;

    /// Close the channel. Closing a closed channel is a no-op.
    async fn disconnect(&self) -> AppResult<()>;

    /// Whether the channel is currently open.
    fn is_connected(&self) -> bool;

    /// Send an event to the server.
    ///
    /// Fails with a service-unavailable error when the channel is closed.
    async fn emit(&self, event: RealtimeEvent) -> AppResult<()>;

    /// Receive every event the server pushes from now on.
    fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent>;
}
