//! Metadata projection and persistence
//!
//! The projection is the minimal set of attributes a user actually chose:
//! it omits site defaults, engine-managed wiring and guessed values, so
//! writing it back to `pkgmeta.meta` never freezes anything the engine can
//! recompute.

use crate::Result;
use crate::config::Config;
use pkg_fs::{NormalizedPath, ProjectFile, save_commented_json};
use pkg_meta::{Tier, schema};
use serde_json::{Map, Value};

/// Project the user-meaningful attributes of `config`, in schema order.
pub fn project(config: &Config) -> Map<String, Value> {
    let mut metadata = Map::new();
    let chosen = |key: &str, value: &Value| {
        config.defaults().get(key) != Some(value) && !config.exclusions().contains(key)
    };

    for entry in schema().build_entries() {
        let key = entry.name;
        let Some(value) = config.get(key) else {
            continue;
        };
        let engine_managed = key == "cmdclass"
            || (key == "tests_require" && !config.is_configured_tests_require());
        if !engine_managed && chosen(key, value) {
            metadata.insert(key.to_string(), value.clone());
        }
    }

    for entry in schema().tier_entries(Tier::Engine) {
        let key = entry.name;
        if key == "runner_args" && !config.is_configured_runner_args() {
            continue;
        }
        if let Some(value) = config.get(key).filter(|value| chosen(key, *value)) {
            metadata.insert(key.to_string(), value.clone());
        }
    }

    metadata
}

/// Write the projection as a commented JSON metadata file.
///
/// The first line records who generated the file and when.
pub fn write_metadata(config: &Config, path: &NormalizedPath, banner: &str) -> Result<()> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let header = format!(
        "{} generated by {} at {}",
        ProjectFile::Metadata,
        banner,
        timestamp
    );
    let metadata = project(config);
    save_commented_json(path, &[header], &metadata)?;
    tracing::info!(%path, keys = metadata.len(), "Wrote project metadata");
    Ok(())
}
