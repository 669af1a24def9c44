//! Realtime events exchanged with the notification server.
//!
//! On the wire an event is a Socket.IO packet `42["<name>",<payload>]`;
//! its serde form `{"event": "<name>", "data": <payload>}` is what the CLI
//! prints.

use serde::{Deserialize, Serialize};

/// Known event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    /// A folder changed (pushed by the server).
    #[serde(rename = "folder:updated")]
    FolderUpdated,
    /// An access tag changed (pushed by the server).
    #[serde(rename = "accessTag:updated")]
    AccessTagUpdated,
    /// A PDF changed (pushed by the server).
    #[serde(rename = "pdf:updated")]
    PdfUpdated,
    /// Admin announces a folder change.
    #[serde(rename = "admin:folder:update")]
    AdminFolderUpdate,
    /// Admin announces an access-tag change.
    #[serde(rename = "admin:accessTag:update")]
    AdminAccessTagUpdate,
    /// Admin announces a PDF change.
    #[serde(rename = "admin:pdf:update")]
    AdminPdfUpdate,
}

impl EventName {
    /// The wire name of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FolderUpdated => "folder:updated",
            Self::AccessTagUpdated => "accessTag:updated",
            Self::PdfUpdated => "pdf:updated",
            Self::AdminFolderUpdate => "admin:folder:update",
            Self::AdminAccessTagUpdate => "admin:accessTag:update",
            Self::AdminPdfUpdate => "admin:pdf:update",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single realtime event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// Event name; unknown names are carried through untouched.
    pub event: String,
    /// Event payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RealtimeEvent {
    /// Build an event with a known name.
    pub fn new(name: EventName, data: serde_json::Value) -> Self {
        Self {
            event: name.as_str().to_string(),
            data,
        }
    }

    /// Whether this event carries the given name.
    pub fn is(&self, name: EventName) -> bool {
        self.event == name.as_str()
    }
}
