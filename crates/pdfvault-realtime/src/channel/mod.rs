//! [`NotificationChannel`](pdfvault_core::traits::NotificationChannel)
//! implementations.

pub mod backoff;
pub mod memory;
pub mod ws;
