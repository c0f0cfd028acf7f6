//! Attribute categorization for interactive configuration

use super::Config;
use pkg_meta::{Tier, schema};

/// Attributes of `tier` that a prompting collaborator should ask for.
///
/// With `reconfigure` every key of the tier is returned. Otherwise the
/// unset keys, plus `classifiers` when `reclassify` is set, plus
/// `runner_args` while it is engine-computed.
pub fn unconfigured(
    config: &Config,
    tier: Tier,
    reconfigure: bool,
    reclassify: bool,
) -> Vec<&'static str> {
    let entries = schema().tier_entries(tier).iter().map(|entry| entry.name);
    if reconfigure {
        return entries.collect();
    }

    entries
        .filter(|key| {
            !config.contains(key)
                || match tier {
                    Tier::Standard => reclassify && *key == "classifiers",
                    Tier::Engine => *key == "runner_args" && !config.is_configured_runner_args(),
                    Tier::Extended => false,
                }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge;
    use serde_json::{Map, Value, json};

    fn config(values: Value) -> Config {
        let Value::Object(explicit) = values else {
            panic!("expected an object");
        };
        merge(Map::new(), explicit).unwrap()
    }

    #[test]
    fn test_standard_tier() {
        let config = config(json!({"name": "demo", "classifiers": ["Topic :: Utilities"]}));

        let missing = unconfigured(&config, Tier::Standard, false, false);
        assert!(!missing.contains(&"name"));
        assert!(!missing.contains(&"classifiers"));
        assert!(missing.contains(&"version"));

        let reclassify = unconfigured(&config, Tier::Standard, false, true);
        assert!(reclassify.contains(&"classifiers"));

        assert_eq!(unconfigured(&config, Tier::Standard, true, false).len(), 17);
    }

    #[test]
    fn test_engine_tier_asks_for_computed_runner_args() {
        let config = config(json!({"name": "demo", "test_runner": "pytest"}));
        let missing = unconfigured(&config, Tier::Engine, false, false);
        assert_eq!(missing, vec!["tests_dir", "runner_args", "source_label", "source_url"]);
    }

    #[test]
    fn test_extended_tier() {
        let config = config(json!({"zip_safe": false}));
        let missing = unconfigured(&config, Tier::Extended, false, false);
        assert!(!missing.contains(&"zip_safe"));
        assert!(missing.contains(&"keywords"));
    }
}
