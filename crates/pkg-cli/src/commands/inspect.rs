//! Read-only views of a resolved configuration

use std::path::Path;

use colored::Colorize;
use pkg_core::unconfigured;
use pkg_meta::Tier;

use super::resolve;
use crate::error::Result;

/// Print the projected metadata as JSON.
pub fn run_metadata(path: &Path, site_defaults: Option<&Path>) -> Result<()> {
    let config = resolve(path, site_defaults)?;
    println!("{}", serde_json::to_string_pretty(&pkg_core::project(&config))?);
    Ok(())
}

/// Print the setup() keyword arguments as JSON.
pub fn run_kwargs(path: &Path, site_defaults: Option<&Path>) -> Result<()> {
    let config = resolve(path, site_defaults)?;
    println!("{}", serde_json::to_string_pretty(&config.as_kwargs())?);
    Ok(())
}

/// Print the attributes of `tier` still waiting for a value.
pub fn run_unconfigured(
    path: &Path,
    site_defaults: Option<&Path>,
    tier: Tier,
    reconfigure: bool,
    reclassify: bool,
) -> Result<()> {
    let config = resolve(path, site_defaults)?;
    let keys = unconfigured(&config, tier, reconfigure, reclassify);
    if keys.is_empty() {
        println!("{}", "All attributes configured".green());
        return Ok(());
    }
    for key in keys {
        println!("{key}");
    }
    Ok(())
}
