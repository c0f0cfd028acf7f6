//! Resolved package configuration
//!
//! A [`Config`] is built once per invocation from merged sources, may be
//! mutated by collaborators (prompting, guesswork) and is finally consumed
//! by the projector and the descriptor renderer.
//!
//! # Sources
//!
//! Later sources override earlier ones:
//!
//! 1. **Site defaults** - `~/.pkgmeta`
//! 2. **Project metadata** - `<project>/pkgmeta.meta`
//!
//! Every mutation goes through [`Config::set`] or [`Config::unset`], which
//! re-run [`Config::verify`] so derived attributes (runner wiring, long
//! description, metadata shim) always reflect the current values.
//!
//! # Example
//!
//! ```ignore
//! use pkg_core::config::ConfigResolver;
//! use pkg_fs::NormalizedPath;
//!
//! let mut config = ConfigResolver::new(NormalizedPath::new("/path/to/project")).resolve()?;
//! config.set("name", serde_json::json!("renamed"))?;
//! println!("{}", pkg_core::render(&config));
//! ```

mod categories;
mod exclusions;
mod merge;
mod resolver;

pub use categories::unconfigured;
pub use exclusions::ExclusionSet;
pub use merge::{merge, merge_at};
pub use resolver::ConfigResolver;

use crate::Result;
use crate::derive::{self, LongDescription, MetadataShim};
use pkg_fs::NormalizedPath;
use pkg_meta::{TestRunner, schema};
use serde_json::{Map, Value};

/// Attribute bag keyed by schema names, plus engine state.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) attrs: Map<String, Value>,
    pub(crate) unknown: Map<String, Value>,
    pub(crate) defaults: Map<String, Value>,
    pub(crate) exclusions: ExclusionSet,
    pub(crate) configured_runner_args: bool,
    pub(crate) configured_tests_require: bool,
    /// `runner_args` as last computed by the engine
    pub(crate) engine_runner_args: Option<Vec<String>>,
    /// `tests_require` as last written by the engine
    pub(crate) engine_tests_require: Option<Vec<String>>,
    /// The user's own `tests_require` before runner dependencies were added
    pub(crate) user_tests_require: Option<Vec<String>>,
    pub(crate) long_description: LongDescription,
    pub(crate) metadata: Option<MetadataShim>,
    pub(crate) root: NormalizedPath,
}

impl Config {
    pub(crate) fn empty(root: NormalizedPath) -> Self {
        Self {
            attrs: Map::new(),
            unknown: Map::new(),
            defaults: Map::new(),
            exclusions: ExclusionSet::new(),
            configured_runner_args: false,
            configured_tests_require: false,
            engine_runner_args: None,
            engine_tests_require: None,
            user_tests_require: None,
            long_description: LongDescription::default(),
            metadata: None,
            root,
        }
    }

    /// Value of a schema attribute, `None` when unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// A string attribute.
    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// A list attribute as strings; a bare string reads as one element.
    pub fn list_attr(&self, key: &str) -> Option<Vec<String>> {
        match self.attrs.get(key)? {
            Value::Array(items) => Some(items.iter().map(pkg_meta::literal::py_str).collect()),
            Value::String(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attr("name")
    }

    /// Present attributes in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        schema()
            .entries()
            .filter_map(|entry| self.attrs.get(entry.name).map(|value| (entry.name, value)))
    }

    /// Attributes that are not schema keys. Kept, never emitted.
    pub fn unknown(&self) -> &Map<String, Value> {
        &self.unknown
    }

    /// Values that came from site defaults or alias fill-in.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Mark `key` as guessed so it never reaches persisted metadata.
    pub fn exclude(&mut self, key: impl Into<String>) {
        self.exclusions.insert(key);
    }

    /// Whether `runner_args` was customized by the user.
    pub fn is_configured_runner_args(&self) -> bool {
        self.configured_runner_args
    }

    /// Whether `tests_require` was customized by the user.
    pub fn is_configured_tests_require(&self) -> bool {
        self.configured_tests_require
    }

    /// The active test runner, if `test_runner` is set.
    pub fn runner(&self) -> Option<TestRunner> {
        self.str_attr("test_runner").map(TestRunner::select)
    }

    pub fn long_description(&self) -> &LongDescription {
        &self.long_description
    }

    /// The PKG-INFO shim, present when a source label or url is set.
    pub fn metadata(&self) -> Option<&MetadataShim> {
        self.metadata.as_ref()
    }

    /// Set an attribute and re-verify.
    ///
    /// `<feature>_require(s)` keys that are not schema keys fold into
    /// `extras_require`, filling gaps only. If verification fails the
    /// configuration is left exactly as it was before the call.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let snapshot = self.clone();
        self.bind(key.to_string(), value);
        if let Err(e) = self.verify() {
            *self = snapshot;
            return Err(e);
        }
        tracing::debug!(key, "Attribute set");
        Ok(())
    }

    /// Remove an attribute and re-verify, returning the old value.
    ///
    /// Like [`Config::set`], a failed verification restores the previous
    /// configuration.
    pub fn unset(&mut self, key: &str) -> Result<Option<Value>> {
        let snapshot = self.clone();
        let removed = self
            .attrs
            .remove(key)
            .or_else(|| self.unknown.remove(key));
        if let Err(e) = self.verify() {
            *self = snapshot;
            return Err(e);
        }
        tracing::debug!(key, "Attribute unset");
        Ok(removed)
    }

    /// Route a raw value to its home: extras, the attribute bag, or the
    /// unknown map.
    pub(crate) fn bind(&mut self, key: String, value: Value) {
        if let Some(feature) = derive::extras::feature_name(&key) {
            derive::extras::fold(&mut self.attrs, Map::from_iter([(feature, value)]));
        } else if schema().is_schema_key(&key) {
            self.attrs.insert(key, value);
        } else {
            tracing::warn!(%key, "Unknown attribute, it will not be passed to setup()");
            self.unknown.insert(key, value);
        }
    }

    /// Coerce every attribute and recompute derived attributes.
    ///
    /// Idempotent: verifying a verified configuration changes nothing.
    pub fn verify(&mut self) -> Result<()> {
        self.coerce_attributes()?;
        derive::runner::activate(self);
        derive::long_description::materialize(self);
        self.metadata = MetadataShim::from_config(self);
        self.coerce_attributes()?;
        Ok(())
    }

    fn coerce_attributes(&mut self) -> Result<()> {
        for entry in schema().entries() {
            if let Some(value) = self.attrs.get(entry.name) {
                let coerced = pkg_meta::verify(entry.name, value, &entry.contract)?;
                self.attrs.insert(entry.name.to_string(), coerced);
            }
        }
        Ok(())
    }
}
