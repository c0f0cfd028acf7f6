//! Generated descriptor detection

use crate::descriptor::notice;
use pkg_fs::{NormalizedPath, io};

/// Whether descriptor text carries the autogenerated notice.
pub fn is_generated_descriptor(text: &str) -> bool {
    text.contains(&notice())
}

/// Whether the file at `path` is a generated descriptor.
///
/// Unreadable files are treated as hand-written.
pub fn is_generated_file(path: &NormalizedPath) -> bool {
    match io::read_text(path) {
        Ok(text) => is_generated_descriptor(&text),
        Err(e) => {
            tracing::debug!(%path, error = %e, "Could not read descriptor");
            false
        }
    }
}
