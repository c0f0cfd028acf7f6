//! Set command implementation

use std::path::Path;

use colored::Colorize;
use pkg_core::derive::extras;
use pkg_core::write_metadata;
use pkg_fs::{NormalizedPath, ProjectFile};
use pkg_meta::{Contract, coerce_input, schema};

use super::{banner, resolve};
use crate::error::{CliError, Result};

/// Set `key` from prompt-style text and rewrite pkgmeta.meta.
pub fn run_set(path: &Path, site_defaults: Option<&Path>, key: &str, text: &str) -> Result<()> {
    let contract = match schema().contract(key) {
        Some(contract) => contract.clone(),
        None if extras::feature_name(key).is_some() => Contract::ListOfString,
        None => return Err(CliError::user(format!("Unknown attribute: {key}"))),
    };

    let mut config = resolve(path, site_defaults)?;
    match coerce_input(text, key, &contract)? {
        Some(value) => config.set(key, value)?,
        None => {
            config.unset(key)?;
        }
    }

    let metadata_path = NormalizedPath::new(path).join(ProjectFile::Metadata.as_str());
    write_metadata(&config, &metadata_path, &banner())?;
    println!("{} {} in {}", "Updated".green(), key.cyan(), metadata_path);
    Ok(())
}
