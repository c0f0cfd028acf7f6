//! Error types for pkg-core

use std::path::PathBuf;

/// Result type for pkg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or rendering a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Project directory does not exist
    #[error("Project directory not found at {path}")]
    ProjectNotFound { path: PathBuf },

    /// An existing setup.py was not generated by pkgmeta
    #[error("Refusing to overwrite hand-written {path}")]
    HandWrittenDescriptor { path: PathBuf },

    /// PKG-INFO requested but no source_label/source_url configured
    #[error("No source_label or source_url configured for {name}")]
    NoMetadataShim { name: String },

    /// data_files entries must be (directory, [files]) pairs
    #[error("Malformed data_files: {value}")]
    MalformedDataFiles { value: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from pkg-fs
    #[error(transparent)]
    Fs(#[from] pkg_fs::Error),

    /// Schema or coercion error from pkg-meta
    #[error(transparent)]
    Meta(#[from] pkg_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
