//! Write command implementation

use std::path::Path;

use colored::Colorize;
use pkg_core::{update_manifest, write_descriptor, write_metadata};
use pkg_fs::{NormalizedPath, ProjectFile};

use super::{banner, resolve};
use crate::error::Result;

/// Write setup.py, and optionally pkgmeta.meta and MANIFEST.in.
pub fn run_write(path: &Path, site_defaults: Option<&Path>, metadata: bool, manifest: bool) -> Result<()> {
    let config = resolve(path, site_defaults)?;
    let root = NormalizedPath::new(path);

    let descriptor = write_descriptor(&config, &root)?;
    println!("{} Wrote {}", "+".green(), descriptor.as_str().cyan());

    if metadata {
        let metadata_path = root.join(ProjectFile::Metadata.as_str());
        write_metadata(&config, &metadata_path, &banner())?;
        println!("{} Wrote {}", "+".green(), metadata_path.as_str().cyan());
    }

    if manifest {
        let added = update_manifest(&config, &root)?;
        if added.is_empty() {
            println!("  {} {} already complete", "=".dimmed(), ProjectFile::Manifest);
        }
        for line in added {
            println!("{} {}", "+".green(), line);
        }
    }

    Ok(())
}
