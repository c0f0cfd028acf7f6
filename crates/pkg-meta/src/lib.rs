//! Attribute schema and type contracts for pkgmeta.
//!
//! This crate owns the static catalog of recognized package attributes,
//! the coercion rules that bring raw metadata values in line with their
//! declared contracts, and the test runner variants the engine can wire up.

pub mod coerce;
pub mod error;
pub mod input;
pub mod literal;
pub mod runner;
pub mod schema;

pub use coerce::{ensure_list, verify};
pub use error::{Error, Result};
pub use input::coerce_input;
pub use runner::TestRunner;
pub use schema::{Contract, ScalarKind, Schema, SchemaEntry, Tier, schema};
