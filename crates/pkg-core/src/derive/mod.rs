//! Derived attribute engine
//!
//! Attributes computed from other attributes. Each procedure is idempotent
//! and runs on every [`Config::verify`](crate::Config::verify).

pub mod extras;
pub mod long_description;
pub(crate) mod runner;
pub mod shim;

pub use long_description::LongDescription;
pub use shim::MetadataShim;
