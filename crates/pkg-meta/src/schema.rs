//! Attribute schema registry
//!
//! Every attribute pkgmeta understands is declared here, once per process,
//! together with its type contract. The catalogs are ordered: the
//! descriptor emits attributes in catalog order, and the prompting
//! collaborator walks the standard tier (the first 17 keys) before the
//! extended one.

use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Primitive value kinds a contract can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Bool,
    Int,
    Float,
    /// Any value is accepted unchanged
    Any,
}

impl ScalarKind {
    /// The Python type name used in descriptors and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Any => "object",
        }
    }

    /// Whether `value` already is an instance of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_f64(),
            Self::Any => true,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type contract of a schema attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Contract {
    Scalar(ScalarKind),
    /// Ordered, de-duplicated list of strings
    ListOfString,
    /// Mapping of key kind to value contract
    Mapping(ScalarKind, Box<Contract>),
    /// Ordered alternatives, first match wins
    OneOf(Vec<Contract>),
}

impl Contract {
    fn mapping(key: ScalarKind, value: Contract) -> Self {
        Self::Mapping(key, Box::new(value))
    }

    /// Whether `value` has the outer shape of this contract.
    ///
    /// Shape only: a list of numbers has the shape of `ListOfString`.
    pub fn accepts_shape(&self, value: &Value) -> bool {
        match self {
            Self::Scalar(kind) => kind.accepts(value),
            Self::ListOfString => value.is_array(),
            Self::Mapping(..) => value.is_object(),
            Self::OneOf(alternatives) => alternatives.iter().any(|c| c.accepts_shape(value)),
        }
    }

    /// Human readable description, e.g. `str or list`.
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(kind) => kind.name().to_string(),
            Self::ListOfString => "list".to_string(),
            Self::Mapping(..) => "dict".to_string(),
            Self::OneOf(alternatives) => describe_alternatives(alternatives),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Join alternative names as `a, b or c`.
pub fn describe_alternatives(alternatives: &[Contract]) -> String {
    let names: Vec<String> = alternatives.iter().map(Contract::describe).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Catalog an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Common setuptools keywords
    Standard,
    /// Less common setuptools keywords
    Extended,
    /// Engine keys, never passed to setuptools
    Engine,
}

/// A named, typed attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub name: &'static str,
    pub contract: Contract,
}

impl SchemaEntry {
    fn new(name: &'static str, contract: Contract) -> Self {
        Self { name, contract }
    }
}

/// The three ordered attribute catalogs.
#[derive(Debug)]
pub struct Schema {
    standard: Vec<SchemaEntry>,
    extended: Vec<SchemaEntry>,
    engine: Vec<SchemaEntry>,
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::build);

/// The process-wide schema.
pub fn schema() -> &'static Schema {
    &SCHEMA
}

impl Schema {
    fn build() -> Self {
        use Contract::{ListOfString, OneOf, Scalar};
        use ScalarKind::{Any, Bool, Str};

        let str_or_list = || OneOf(vec![Scalar(Str), ListOfString]);
        let str_to_list = || Contract::mapping(Str, ListOfString);

        let standard = vec![
            SchemaEntry::new("name", Scalar(Str)),
            SchemaEntry::new("version", Scalar(Str)),
            SchemaEntry::new("description", Scalar(Str)),
            SchemaEntry::new("long_description", Scalar(Str)),
            SchemaEntry::new("author", Scalar(Str)),
            SchemaEntry::new("author_email", Scalar(Str)),
            SchemaEntry::new("maintainer", Scalar(Str)),
            SchemaEntry::new("maintainer_email", Scalar(Str)),
            SchemaEntry::new("url", Scalar(Str)),
            SchemaEntry::new("download_url", Scalar(Str)),
            SchemaEntry::new("packages", ListOfString),
            SchemaEntry::new("py_modules", ListOfString),
            SchemaEntry::new("scripts", ListOfString),
            SchemaEntry::new("entry_points", str_to_list()),
            SchemaEntry::new("install_requires", str_or_list()),
            SchemaEntry::new("tests_require", str_or_list()),
            SchemaEntry::new("classifiers", ListOfString),
        ];

        let extended = vec![
            SchemaEntry::new("ext_modules", ListOfString),
            SchemaEntry::new("keywords", ListOfString),
            SchemaEntry::new("platforms", ListOfString),
            SchemaEntry::new("cmdclass", Contract::mapping(Str, Scalar(Any))),
            SchemaEntry::new("data_files", OneOf(vec![ListOfString])),
            SchemaEntry::new("package_dir", Contract::mapping(Str, Scalar(Str))),
            SchemaEntry::new("build_requires", str_or_list()),
            SchemaEntry::new("setup_requires", str_or_list()),
            SchemaEntry::new("extras_require", str_to_list()),
            SchemaEntry::new("include_package_data", Scalar(Bool)),
            SchemaEntry::new("exclude_package_data", str_to_list()),
            SchemaEntry::new("package_data", str_to_list()),
            SchemaEntry::new("zip_safe", Scalar(Bool)),
            SchemaEntry::new("dependency_links", ListOfString),
            SchemaEntry::new("namespace_packages", ListOfString),
            SchemaEntry::new("test_suite", Scalar(Str)),
            SchemaEntry::new("test_loader", Scalar(Str)),
            SchemaEntry::new("eager_resources", ListOfString),
            SchemaEntry::new("use_2to3", Scalar(Bool)),
            SchemaEntry::new("convert_2to3_doctests", ListOfString),
            SchemaEntry::new("use_2to3_fixtures", ListOfString),
            SchemaEntry::new("extensions", str_to_list()),
        ];

        let engine = vec![
            SchemaEntry::new("test_runner", Scalar(Str)),
            SchemaEntry::new("tests_dir", Scalar(Str)),
            SchemaEntry::new("runner_args", ListOfString),
            SchemaEntry::new("source_label", Scalar(Str)),
            SchemaEntry::new("source_url", Scalar(Str)),
        ];

        Self {
            standard,
            extended,
            engine,
        }
    }

    /// Entries of one tier, in declared order.
    pub fn tier_entries(&self, tier: Tier) -> &[SchemaEntry] {
        match tier {
            Tier::Standard => &self.standard,
            Tier::Extended => &self.extended,
            Tier::Engine => &self.engine,
        }
    }

    /// Standard then extended entries: the keywords passed to setuptools.
    pub fn build_entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.standard.iter().chain(self.extended.iter())
    }

    /// Every entry, engine keys last.
    pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.build_entries().chain(self.engine.iter())
    }

    /// Look up an entry by attribute name.
    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    /// The contract of an attribute, if it is a schema key.
    pub fn contract(&self, name: &str) -> Option<&Contract> {
        self.get(name).map(|entry| &entry.contract)
    }

    /// The tier an attribute belongs to.
    pub fn tier(&self, name: &str) -> Option<Tier> {
        [Tier::Standard, Tier::Extended, Tier::Engine]
            .into_iter()
            .find(|tier| self.tier_entries(*tier).iter().any(|e| e.name == name))
    }

    /// Whether `name` is a recognized attribute.
    pub fn is_schema_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether `name` is a setuptools keyword (standard or extended).
    pub fn is_build_key(&self, name: &str) -> bool {
        self.build_entries().any(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tier_has_seventeen_keys() {
        let standard = schema().tier_entries(Tier::Standard);
        assert_eq!(standard.len(), 17);
        assert_eq!(standard.first().map(|e| e.name), Some("name"));
        assert_eq!(standard.last().map(|e| e.name), Some("classifiers"));
    }

    #[test]
    fn test_tier_lookup() {
        assert_eq!(schema().tier("author"), Some(Tier::Standard));
        assert_eq!(schema().tier("zip_safe"), Some(Tier::Extended));
        assert_eq!(schema().tier("runner_args"), Some(Tier::Engine));
        assert_eq!(schema().tier("foo_requires"), None);
    }

    #[test]
    fn test_engine_keys_are_not_build_keys() {
        assert!(schema().is_schema_key("test_runner"));
        assert!(!schema().is_build_key("test_runner"));
        assert!(schema().is_build_key("extras_require"));
    }

    #[test]
    fn test_describe_alternatives() {
        use ScalarKind::*;
        assert_eq!(
            Contract::OneOf(vec![Contract::Scalar(Str), Contract::ListOfString]).describe(),
            "str or list"
        );
        assert_eq!(
            Contract::OneOf(vec![
                Contract::Scalar(Float),
                Contract::Scalar(Int),
                Contract::Scalar(Str)
            ])
            .describe(),
            "float, int or str"
        );
        assert_eq!(Contract::OneOf(vec![Contract::ListOfString]).describe(), "list");
    }
}
