//! Source merging
//!
//! Site defaults and explicit values are overlaid (explicit wins), extras
//! requirement keys are folded, aliases are filled in, and the result is
//! verified.

use super::Config;
use crate::Result;
use crate::derive::extras;
use pkg_fs::NormalizedPath;
use pkg_meta::schema;
use serde_json::{Map, Value};

/// Attribute pairs where the alias defaults to the primary's value.
const ALIASES: [(&str, &str); 3] = [
    ("description", "long_description"),
    ("author", "maintainer"),
    ("author_email", "maintainer_email"),
];

/// Merge sources for a project in the current directory.
pub fn merge(site_defaults: Map<String, Value>, explicit: Map<String, Value>) -> Result<Config> {
    merge_at(NormalizedPath::new("."), site_defaults, explicit)
}

/// Merge sources for the project rooted at `root`.
///
/// Relative file attributes (`long_description`) resolve against `root`.
pub fn merge_at(
    root: NormalizedPath,
    site_defaults: Map<String, Value>,
    explicit: Map<String, Value>,
) -> Result<Config> {
    let mut config = Config::empty(root);

    let mut combined = site_defaults.clone();
    combined.extend(explicit);

    let mut folded = Map::new();
    for (key, value) in combined {
        match extras::feature_name(&key) {
            Some(feature) => {
                folded.insert(feature, value);
            }
            None => config.bind(key, value),
        }
    }
    extras::fold(&mut config.attrs, folded);

    config.defaults = coerced_defaults(site_defaults);
    fill_aliases(&mut config);

    config.verify()?;
    tracing::debug!(
        attributes = config.attrs.len(),
        defaults = config.defaults.len(),
        "Configuration merged"
    );
    Ok(config)
}

fn fill_aliases(config: &mut Config) {
    for (primary, alias) in ALIASES {
        let Some(value) = config.attrs.get(primary).cloned() else {
            continue;
        };
        if !config.attrs.contains_key(alias) {
            config.attrs.insert(alias.to_string(), value.clone());
        }
        if config.attrs.get(alias) == Some(&value) {
            config.defaults.insert(alias.to_string(), value);
        }
    }
}

/// Site defaults in coerced form, so they compare equal to the attributes
/// they produced. Values that fail coercion are kept raw.
fn coerced_defaults(site_defaults: Map<String, Value>) -> Map<String, Value> {
    site_defaults
        .into_iter()
        .map(|(key, value)| {
            let coerced = schema()
                .contract(&key)
                .and_then(|contract| pkg_meta::verify(&key, &value, contract).ok())
                .unwrap_or(value);
            (key, coerced)
        })
        .collect()
}
