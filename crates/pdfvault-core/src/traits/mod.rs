//! Trait seams for the external collaborators the core is reached through.

pub mod folder_source;
pub mod notification;

pub use folder_source::FolderSource;
pub use notification::NotificationChannel;
