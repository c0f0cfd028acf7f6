//! Shared test utilities for the pkgmeta workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`] - [`TestProject`] builder for Python project layouts

pub mod project;

pub use project::TestProject;
