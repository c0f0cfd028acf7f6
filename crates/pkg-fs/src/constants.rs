//! Well-known file names used by pkgmeta.

use std::path::Path;

/// Files pkgmeta reads or writes inside a project (or the home directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFile {
    /// Per-project metadata document (commented JSON)
    Metadata,
    /// User-global site defaults, stored in the home directory
    SiteDefaults,
    /// The generated build descriptor
    Descriptor,
    /// Source manifest consumed by setuptools' sdist
    Manifest,
    /// Package metadata written into an egg-info directory
    PkgInfo,
}

impl ProjectFile {
    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "pkgmeta.meta",
            Self::SiteDefaults => ".pkgmeta",
            Self::Descriptor => "setup.py",
            Self::Manifest => "MANIFEST.in",
            Self::PkgInfo => "PKG-INFO",
        }
    }
}

impl AsRef<Path> for ProjectFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
