//! PDF document entities.

pub mod model;

pub use model::{Pdf, PdfFilter, UpdatePdf};
