//! # pdfvault-realtime
//!
//! Realtime notification channel for the admin console. Provides:
//!
//! - [`WsChannel`]: Socket.IO client over WebSocket with bounded reconnect backoff
//! - [`MemoryChannel`]: in-process channel for tests and offline use
//! - [`EventDispatcher`]: named-event handler registry fed from a channel
//! - Socket.IO packet codec used by the WebSocket channel

pub mod channel;
pub mod codec;
pub mod dispatch;

pub use channel::memory::MemoryChannel;
pub use channel::ws::WsChannel;
pub use dispatch::dispatcher::{EventDispatcher, HandlerId};
