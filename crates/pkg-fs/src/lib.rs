//! Filesystem layer for pkgmeta
//!
//! Provides normalized paths, atomic text I/O and the commented-JSON
//! document format used by metadata and site-defaults files.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;
pub mod path;

pub use constants::ProjectFile;
pub use document::{load_commented_json, save_commented_json, strip_comment_lines};
pub use error::{Error, Result};
pub use path::NormalizedPath;
