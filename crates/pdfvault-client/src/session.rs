//! Admin session token holder.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use pdfvault_core::AppResult;

/// Holds the bearer token of the logged-in administrator.
///
/// A persistent session mirrors the token to a file so that separate CLI
/// invocations share one login; an in-memory session never touches disk.
#[derive(Debug, Default)]
pub struct Session {
    /// Current bearer token.
    token: RwLock<Option<String>>,
    /// Where the token is mirrored, if anywhere.
    token_file: Option<PathBuf>,
}

impl Session {
    /// Create a session that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a session backed by `path`, loading a token stored there.
    pub fn persistent(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let token = match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), loaded = token.is_some(), "Session initialized");
        Ok(Self {
            token: RwLock::new(token),
            token_file: Some(path),
        })
    }

    /// The current bearer token.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the token.
    pub fn store(&self, token: impl Into<String>) -> AppResult<()> {
        let token = token.into();
        if let Some(path) = &self.token_file {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &token)?;
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// Forget the token.
    pub fn clear(&self) -> AppResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(path) = &self.token_file {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
