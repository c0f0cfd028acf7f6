//! Setup command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::resolve;
use crate::error::Result;

/// Print the descriptor for each project.
///
/// With more than one project each descriptor is preceded by a comment
/// line naming its directory.
pub fn run_setup(paths: &[PathBuf], site_defaults: Option<&Path>) -> Result<()> {
    let many = paths.len() > 1;
    for (index, path) in paths.iter().enumerate() {
        let config = resolve(path, site_defaults)?;
        if many {
            if index > 0 {
                println!();
            }
            println!("{}", format!("# {}", path.display()).dimmed());
        }
        println!("{}", pkg_core::render(&config));
    }
    Ok(())
}
