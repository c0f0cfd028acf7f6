//! setup.py synthesis
//!
//! [`render`] turns a verified [`Config`] into descriptor text:
//!
//! ```text
//! docstring header (autogenerated notice)
//! imports
//! runner glue class        (when test_runner is set)
//! Metadata shim class      (when source_label/source_url is set)
//! long description read    (when read from a file)
//! setup(
//!     key=value,           one per attribute, schema order
//!     packages=..., long_description=..., cmdclass=..., metadata=...
//! )
//! ```

mod glue;
mod packages;

pub use glue::RunnerGlue;
pub use packages::{DEFAULT_EXCLUDES, find_packages, parse_find_packages};

use crate::config::Config;
use crate::{Error, Result};
use pkg_fs::{NormalizedPath, ProjectFile, io};
use pkg_meta::literal::{pretty, py_str, repr, str_repr};
use pkg_meta::schema;
use serde_json::{Map, Value};

/// Keys rendered by dedicated arguments after the plain keywords.
const SPECIAL_KEYS: [&str; 4] = ["packages", "long_description", "cmdclass", "metadata"];

const NOTICE: &str = "This file was autogenerated by pkgmeta. To make changes, you";

/// The two-line notice that marks a descriptor as generated.
pub fn notice() -> String {
    format!(
        "{NOTICE}\nshould edit the {} rather than this setup.py.",
        ProjectFile::Metadata
    )
}

/// Render the descriptor text.
pub fn render(config: &Config) -> String {
    let (packages, find_needed) = packages_argument(config);
    let read_fragment = config.long_description().read_fragment();
    let shim = config.metadata();

    let mut imports = vec!["from setuptools import setup"];
    if find_needed {
        imports.push("from setuptools import find_packages");
    }
    if read_fragment.is_some() {
        imports.insert(0, "import io");
    }
    if shim.is_some() {
        if !imports.contains(&"import io") {
            imports.insert(0, "import io");
        }
        imports.insert(1, "import sys");
        imports.insert(1, "import os");
    }

    let keywords: Vec<String> = config
        .attributes()
        .filter(|(key, _)| schema().is_build_key(key) && !SPECIAL_KEYS.contains(key))
        .map(|(key, value)| format!("    {key}={},", pretty(value, 4)))
        .collect();

    let mut special = vec![Some(packages), long_description_argument(config), cmdclass_argument(config)];
    if shim.is_some() {
        special.push(Some("metadata=Metadata()".to_string()));
    }
    let special: Vec<String> = special
        .into_iter()
        .flatten()
        .map(|argument| format!("    {argument},"))
        .collect();

    let name = config.get("name").map(py_str).unwrap_or_else(|| "None".to_string());

    [
        format!("\"\"\"{}'s setup.py.\n", title_case(&name)),
        NOTICE.to_string(),
        format!("should edit the {} rather than this setup.py.", ProjectFile::Metadata),
        "\"\"\"\n\n".to_string(),
        imports.join("\n"),
        RunnerGlue::new(config).map(|glue| glue.source()).unwrap_or_default(),
        shim.map(|shim| shim.class_source()).unwrap_or_default(),
        format!("{}setup(", read_fragment.unwrap_or_default()),
        keywords.join("\n"),
        special.join("\n"),
        ")".to_string(),
    ]
    .join("\n")
}

/// Write `setup.py` into `root`, refusing to replace a hand-written one.
pub fn write_descriptor(config: &Config, root: &NormalizedPath) -> Result<NormalizedPath> {
    let path = root.join(ProjectFile::Descriptor.as_str());
    if path.is_file() && !crate::clean::is_generated_file(&path) {
        return Err(Error::HandWrittenDescriptor {
            path: path.to_native(),
        });
    }
    io::write_text(&path, &render(config))?;
    tracing::info!(%path, "Wrote descriptor");
    Ok(path)
}

/// `packages=` argument and whether `find_packages` must be imported.
fn packages_argument(config: &Config) -> (String, bool) {
    let Some(packages) = config.list_attr("packages") else {
        let excludes = Value::from(DEFAULT_EXCLUDES.to_vec());
        return (format!("packages=find_packages(exclude={})", repr(&excludes)), true);
    };
    let call = packages.iter().find(|entry| entry.contains("find_packages(")).cloned();
    match call {
        Some(call) => (format!("packages={call}"), true),
        None => (format!("packages={}", repr(&Value::from(packages))), false),
    }
}

fn long_description_argument(config: &Config) -> Option<String> {
    let value = config.get("long_description")?;
    if config.long_description().is_materialized() {
        Some("long_description=long_description".to_string())
    } else {
        Some(format!("long_description={}", repr(value)))
    }
}

/// `cmdclass=` with keys as literals and values as bare class names.
fn cmdclass_argument(config: &Config) -> Option<String> {
    let Some(Value::Object(cmdclass)) = config.get("cmdclass") else {
        return None;
    };
    if cmdclass.is_empty() {
        return None;
    }
    let entries: Vec<String> = cmdclass
        .iter()
        .map(|(command, class)| format!("{}: {}", str_repr(command), py_str(class)))
        .collect();
    Some(format!("cmdclass={{{}}}", entries.join(", ")))
}

/// Python's `str.title()`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(c);
            previous_cased = false;
        }
    }
    out
}

impl Config {
    /// Keyword arguments for calling setuptools directly.
    ///
    /// `packages` is resolved through native discovery, and a long
    /// description read from a file is replaced by its content.
    pub fn as_kwargs(&self) -> Map<String, Value> {
        let mut kwargs = Map::new();
        for (key, value) in self.attributes() {
            if !schema().is_build_key(key) {
                continue;
            }
            let value = match key {
                "packages" => Value::from(self.resolved_packages()),
                "long_description" => self
                    .long_description()
                    .content()
                    .map(Value::from)
                    .unwrap_or_else(|| value.clone()),
                _ => value.clone(),
            };
            kwargs.insert(key.to_string(), value);
        }

        if !kwargs.contains_key("packages") {
            let excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
            let found = find_packages(self.root(), &excludes);
            if !found.is_empty() {
                kwargs.insert("packages".to_string(), Value::from(found));
            }
        }
        kwargs
    }

    /// The package list, running the first parsable `find_packages(...)`
    /// entry if there is one.
    fn resolved_packages(&self) -> Vec<String> {
        let packages = self.list_attr("packages").unwrap_or_default();
        for entry in &packages {
            if !entry.trim_start().starts_with("find_packages(") {
                continue;
            }
            match parse_find_packages(entry) {
                Some(excludes) => return find_packages(self.root(), &excludes),
                None => tracing::warn!(%entry, "Unsupported find_packages call, using it literally"),
            }
        }
        packages
    }
}
