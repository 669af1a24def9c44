//! Realtime notification channel configuration.

use serde::{Deserialize, Serialize};

/// Realtime (WebSocket) client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Socket.IO endpoint of the notification server.
    #[serde(default = "default_url")]
    pub url: String,
    /// Connection attempts before giving up.
    #[serde(default = "default_attempts")]
    pub reconnect_attempts: u32,
    /// Initial delay between attempts in milliseconds.
    #[serde(default = "default_delay")]
    pub reconnect_delay_ms: u64,
    /// Upper bound for the doubled delay in milliseconds.
    #[serde(default = "default_delay_max")]
    pub reconnect_delay_max_ms: u64,
    /// Internal broadcast buffer size for received events.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_attempts: default_attempts(),
            reconnect_delay_ms: default_delay(),
            reconnect_delay_max_ms: default_delay_max(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:5000/socket.io/?EIO=4&transport=websocket".to_string()
}

fn default_attempts() -> u32 {
    5
}

fn default_delay() -> u64 {
    1000
}

fn default_delay_max() -> u64 {
    5000
}

fn default_channel_buffer() -> usize {
    256
}
