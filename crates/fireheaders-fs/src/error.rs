//! Error types for fireheaders-fs

use std::path::PathBuf;

/// Result type for fireheaders-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during file access
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read \"{}\"; please confirm the file exists.", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {}", .path.display())]
    LockFailed { path: PathBuf },
}

impl Error {
    /// Wrap an I/O error with its path, mapping a missing file to the
    /// user-facing `NotFound` hint
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::Io {
                path: path.into(),
                source,
            }
        }
    }
}
