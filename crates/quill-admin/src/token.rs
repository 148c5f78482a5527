//! Persisted login token.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use quill_gateway::AuthToken;
use tracing::warn;

use crate::error::AdminError;

/// Where the admin login token is kept between calls (and restarts).
#[derive(Debug)]
pub enum TokenSlot {
    /// Held in memory only.
    Memory(RwLock<Option<AuthToken>>),
    /// A plain text file containing just the token.
    File(PathBuf),
}

impl TokenSlot {
    /// Empty in-memory slot.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(RwLock::new(None))
    }

    /// File-backed slot.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Current token, if any.
    ///
    /// An unreadable token file counts as logged out.
    #[must_use]
    pub fn load(&self) -> Option<AuthToken> {
        match self {
            Self::Memory(slot) => slot.read().unwrap_or_else(PoisonError::into_inner).clone(),
            Self::File(path) => match fs::read_to_string(path) {
                Ok(content) => {
                    let token = content.trim();
                    (!token.is_empty()).then(|| AuthToken::new(token))
                }
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read token file");
                    None
                }
            },
        }
    }

    /// Remember `token`.
    pub fn store(&self, token: &AuthToken) -> Result<(), AdminError> {
        match self {
            Self::Memory(slot) => {
                *slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
                Ok(())
            }
            Self::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent).map_err(|source| AdminError::TokenIo {
                        path: path.clone(),
                        source,
                    })?;
                }
                fs::write(path, token.as_str()).map_err(|source| AdminError::TokenIo {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Forget the token.
    pub fn clear(&self) -> Result<(), AdminError> {
        match self {
            Self::Memory(slot) => {
                *slot.write().unwrap_or_else(PoisonError::into_inner) = None;
                Ok(())
            }
            Self::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(AdminError::TokenIo {
                    path: path.clone(),
                    source,
                }),
            },
        }
    }
}
