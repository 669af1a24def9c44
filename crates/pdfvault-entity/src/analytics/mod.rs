//! Dashboard analytics payloads.

pub mod model;

pub use model::{Analytics, Distribution, GroupCount, Overview, TopPdf, TopUploader};
