//! Command implementations for pkg-cli

pub mod inspect;
pub mod pkg_info;
pub mod set;
pub mod setup;
pub mod write;

pub use inspect::{run_kwargs, run_metadata, run_unconfigured};
pub use pkg_info::run_pkg_info;
pub use set::run_set;
pub use setup::run_setup;
pub use write::run_write;

use crate::error::Result;
use pkg_core::{Config, ConfigResolver};
use pkg_fs::NormalizedPath;
use std::path::Path;

/// Banner recorded in generated metadata files.
pub fn banner() -> String {
    format!("pkgmeta {}", env!("CARGO_PKG_VERSION"))
}

/// Resolve the project at `path`, optionally with a custom site defaults file.
pub fn resolve(path: &Path, site_defaults: Option<&Path>) -> Result<Config> {
    let root = NormalizedPath::new(path);
    let resolver = match site_defaults {
        Some(site_defaults) => ConfigResolver::with_site_defaults_path(root, site_defaults.to_path_buf()),
        None => ConfigResolver::new(root),
    };
    Ok(resolver.resolve()?)
}
