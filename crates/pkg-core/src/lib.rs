//! Configuration resolution and setup.py synthesis for pkgmeta
//!
//! This crate turns package metadata into a setuptools descriptor:
//!
//! - **Configuration resolution**: site defaults merged under project metadata
//! - **Derived attributes**: runner wiring, extras folding, long description
//!   and metadata shim, recomputed on every mutation
//! - **Projection**: the minimal metadata a user actually chose
//! - **Rendering**: deterministic `setup.py` text
//!
//! # Architecture
//!
//! ```text
//!                    pkg-cli
//!                       |
//!                   pkg-core
//!                       |
//!              +--------+--------+
//!              |                 |
//!           pkg-fs           pkg-meta
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pkg_core::{ConfigResolver, Result, project, render};
//! use pkg_fs::NormalizedPath;
//!
//! fn example() -> Result<()> {
//!     let config = ConfigResolver::new(NormalizedPath::new(".")).resolve()?;
//!     println!("{}", render(&config));
//!     println!("{:?}", project(&config));
//!     Ok(())
//! }
//! ```

pub mod clean;
pub mod config;
pub mod derive;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod project;

pub use clean::{is_generated_descriptor, is_generated_file};
pub use config::{Config, ConfigResolver, ExclusionSet, merge, merge_at, unconfigured};
pub use derive::{LongDescription, MetadataShim};
pub use descriptor::{RunnerGlue, find_packages, notice, render, write_descriptor};
pub use error::{Error, Result};
pub use manifest::{manifest_includes, read_manifest, update_manifest};
pub use project::{project, write_metadata};
