//! Convenience result type alias for PDFVault.

use crate::error::AppError;

/// A specialized `Result` type for PDFVault operations.
pub type AppResult<T> = Result<T, AppError>;
