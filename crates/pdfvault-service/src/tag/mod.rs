//! Access-tag screen.

pub mod service;

pub use service::{CategoryOverview, NewTag, TagEdit, TagService, filter_tags, sort_tags};
