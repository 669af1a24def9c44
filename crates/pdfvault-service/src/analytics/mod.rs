//! Dashboard analytics.

pub mod service;

pub use service::{AnalyticsService, Highlights, summarize};
