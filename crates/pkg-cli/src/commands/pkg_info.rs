//! PKG-INFO command implementation

use std::path::Path;

use colored::Colorize;
use pkg_fs::NormalizedPath;

use super::resolve;
use crate::error::Result;

/// Write PKG-INFO through the metadata shim.
pub fn run_pkg_info(path: &Path, site_defaults: Option<&Path>, egg_info: &Path) -> Result<()> {
    let config = resolve(path, site_defaults)?;
    let shim = config.metadata().ok_or_else(|| pkg_core::Error::NoMetadataShim {
        name: config.name().unwrap_or("UNKNOWN").to_string(),
    })?;
    let written = shim.write_pkg_info(&NormalizedPath::new(egg_info))?;
    println!("{} Wrote {}", "+".green(), written.as_str().cyan());
    Ok(())
}
