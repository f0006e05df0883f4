//! Error types for fireheaders-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from fireheaders-content
    #[error(transparent)]
    Content(#[from] fireheaders_content::Error),

    /// Error from fireheaders-fs
    #[error(transparent)]
    Fs(#[from] fireheaders_fs::Error),
}
