//! Error types for pkg-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from pkg-core
    #[error(transparent)]
    Core(#[from] pkg_core::Error),

    /// Error from pkg-fs
    #[error(transparent)]
    Fs(#[from] pkg_fs::Error),

    /// Error from pkg-meta
    #[error(transparent)]
    Meta(#[from] pkg_meta::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
