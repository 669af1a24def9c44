//! Event dispatcher: routes received events to registered handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pdfvault_core::events::RealtimeEvent;

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&RealtimeEvent) + Send + Sync>;

/// Registry of handlers keyed by event name.
///
/// Handlers run on the dispatching task, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    /// Event name → handlers.
    handlers: DashMap<String, Vec<(HandlerId, Handler)>>,
    /// Next handler id.
    next_id: AtomicU64,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("events", &self.handlers.len())
            .finish()
    }
}

impl EventDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn on<F>(&self, event: &str, handler: F) -> HandlerId
    where
        F: Fn(&RealtimeEvent) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove one handler. Returns whether it was registered.
    pub fn off(&self, event: &str, id: HandlerId) -> bool {
        let Some(mut entry) = self.handlers.get_mut(event) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|(hid, _)| *hid != id);
        let removed = entry.len() < before;
        let empty = entry.is_empty();
        drop(entry);
        if empty {
            self.handlers.remove(event);
        }
        removed
    }

    /// Remove every handler of `event`. Returns how many were removed.
    pub fn off_all(&self, event: &str) -> usize {
        self.handlers
            .remove(event)
            .map(|(_, handlers)| handlers.len())
            .unwrap_or(0)
    }

    /// Number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map(|h| h.len()).unwrap_or(0)
    }

    /// Run the handlers of `event`. Returns how many ran.
    pub fn dispatch(&self, event: &RealtimeEvent) -> usize {
        // Snapshot so a handler may register or remove handlers.
        let handlers: Vec<Handler> = match self.handlers.get(&event.event) {
            Some(entry) => entry.iter().map(|(_, h)| h.clone()).collect(),
            None => return 0,
        };
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Dispatch every event received on `rx` until the channel closes.
    pub fn run(self: Arc<Self>, mut rx: broadcast::Receiver<RealtimeEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let handled = self.dispatch(&event);
                        debug!(event = %event.event, handled, "Dispatched realtime event");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event dispatcher lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
