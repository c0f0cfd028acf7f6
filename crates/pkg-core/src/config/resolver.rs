//! Configuration resolution from the filesystem
//!
//! The `ConfigResolver` loads the site defaults and the project's metadata
//! file and merges them into a verified [`Config`].

use super::{Config, merge_at};
use crate::{Error, Result};
use pkg_fs::{NormalizedPath, ProjectFile, load_commented_json};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Resolves a project's configuration by merging its sources.
///
/// Sources, later overriding earlier:
/// 1. Site defaults (`~/.pkgmeta`)
/// 2. Project metadata (`<root>/pkgmeta.meta`)
///
/// Both are commented JSON. A missing or malformed document contributes
/// nothing rather than failing the resolution.
pub struct ConfigResolver {
    /// Project root directory
    root: NormalizedPath,

    /// Override for the site defaults file (used for testing).
    /// When `None`, `~/.pkgmeta` is used via `dirs::home_dir()`.
    site_defaults_override: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver for the project at `root`.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            site_defaults_override: None,
        }
    }

    /// Create a resolver with a custom site defaults file.
    ///
    /// This is primarily useful for testing, where the real home directory
    /// must not leak into results.
    pub fn with_site_defaults_path(root: NormalizedPath, site_defaults: PathBuf) -> Self {
        Self {
            root,
            site_defaults_override: Some(site_defaults),
        }
    }

    /// Location of the site defaults file.
    pub fn site_defaults_path(&self) -> Option<PathBuf> {
        if let Some(ref override_path) = self.site_defaults_override {
            return Some(override_path.clone());
        }
        dirs::home_dir().map(|home| home.join(ProjectFile::SiteDefaults.as_str()))
    }

    /// Load the site defaults document.
    pub fn site_defaults(&self) -> Map<String, Value> {
        match self.site_defaults_path() {
            Some(path) => {
                tracing::debug!(?path, "Loading site defaults");
                load_commented_json(&NormalizedPath::new(path))
            }
            None => {
                tracing::debug!("No home directory, skipping site defaults");
                Map::new()
            }
        }
    }

    /// Path of the project's metadata file.
    pub fn metadata_path(&self) -> NormalizedPath {
        self.root.join(ProjectFile::Metadata.as_str())
    }

    /// Check if the project has a metadata file.
    pub fn has_metadata(&self) -> bool {
        self.metadata_path().is_file()
    }

    /// Load and merge all sources into a verified configuration.
    pub fn resolve(&self) -> Result<Config> {
        if !self.root.is_dir() {
            return Err(Error::ProjectNotFound {
                path: self.root.to_native(),
            });
        }

        let site_defaults = self.site_defaults();

        let metadata_path = self.metadata_path();
        let explicit = if metadata_path.is_file() {
            tracing::debug!(path = %metadata_path, "Loading project metadata");
            load_commented_json(&metadata_path)
        } else {
            tracing::info!(root = %self.root, "Using site defaults, no {} found", ProjectFile::Metadata);
            Map::new()
        };

        merge_at(self.root.clone(), site_defaults, explicit)
    }

    /// Get the project root path
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn resolver(project: &TempDir, home: &TempDir) -> ConfigResolver {
        ConfigResolver::with_site_defaults_path(
            NormalizedPath::new(project.path()),
            home.path().join(".pkgmeta"),
        )
    }

    #[test]
    fn resolve_without_any_sources_is_empty() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let resolver = resolver(&project, &home);

        assert!(!resolver.has_metadata());
        let config = resolver.resolve().unwrap();
        assert_eq!(config.attributes().count(), 0);
    }

    #[test]
    fn resolve_mixes_in_site_defaults() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join(".pkgmeta"), r#"{"author": "you!"}"#).unwrap();
        std::fs::write(project.path().join("pkgmeta.meta"), r#"{"name": "demo"}"#).unwrap();

        let config = resolver(&project, &home).resolve().unwrap();
        assert_eq!(config.str_attr("author"), Some("you!"));
        assert_eq!(config.str_attr("name"), Some("demo"));
        assert_eq!(config.defaults().get("author"), Some(&json!("you!")));
    }

    #[test]
    fn resolve_tolerates_malformed_metadata() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        std::fs::write(project.path().join("pkgmeta.meta"), "# header\n{\"name\": }").unwrap();

        let config = resolver(&project, &home).resolve().unwrap();
        assert!(config.name().is_none());
    }

    #[test]
    fn resolve_missing_project_fails() {
        let home = TempDir::new().unwrap();
        let resolver = ConfigResolver::with_site_defaults_path(
            NormalizedPath::new(home.path().join("missing")),
            home.path().join(".pkgmeta"),
        );
        assert!(matches!(resolver.resolve(), Err(Error::ProjectNotFound { .. })));
    }
}
