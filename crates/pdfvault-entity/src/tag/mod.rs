//! Access-tag entities.

pub mod model;

pub use model::{AccessTag, BulkTagAction, CategoryCount, TagFilter, TagSort, TagStats, TagUsage};
