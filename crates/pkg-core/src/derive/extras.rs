//! Extras requirement folding
//!
//! Any `<feature>_require` or `<feature>_requires` attribute that is not
//! itself a schema key is an optional feature's requirement list and lands
//! in `extras_require[<feature>]`.

use pkg_meta::schema;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static EXTRAS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_requires?$").expect("Invalid extras key regex"));

/// Feature name for a foldable key, `None` for schema keys and others.
pub fn feature_name(key: &str) -> Option<String> {
    if schema().is_schema_key(key) {
        return None;
    }
    EXTRAS_KEY
        .captures(key)
        .and_then(|caps| caps.get(1))
        .map(|feature| feature.as_str().to_string())
}

/// Merge folded features into `extras_require`, filling gaps only.
///
/// Keys already present in a directly supplied `extras_require` win. A
/// non-mapping `extras_require` is left alone for verification to reject.
pub fn fold(attrs: &mut Map<String, Value>, folded: Map<String, Value>) {
    if folded.is_empty() {
        return;
    }
    match attrs.get_mut("extras_require") {
        Some(Value::Object(extras)) => {
            for (feature, requirements) in folded {
                if extras.contains_key(&feature) {
                    tracing::debug!(%feature, "Extras already supplied directly, keeping them");
                    continue;
                }
                extras.insert(feature, requirements);
            }
        }
        Some(_) => {}
        None => {
            attrs.insert("extras_require".to_string(), Value::Object(folded));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name("foo_requires"), Some("foo".to_string()));
        assert_eq!(feature_name("bar_require"), Some("bar".to_string()));
        assert_eq!(feature_name("with_under_require"), Some("with_under".to_string()));
        assert_eq!(feature_name("install_requires"), None);
        assert_eq!(feature_name("tests_require"), None);
        assert_eq!(feature_name("_require"), None);
        assert_eq!(feature_name("requires"), None);
    }

    #[test]
    fn test_fold_fills_gaps_only() {
        let mut attrs = Map::new();
        attrs.insert("extras_require".into(), json!({"feature_x": ["direct"]}));

        let mut folded = Map::new();
        folded.insert("feature_x".into(), json!(["folded"]));
        folded.insert("my_thing".into(), json!(["foo"]));
        fold(&mut attrs, folded);

        assert_eq!(
            attrs.get("extras_require"),
            Some(&json!({"feature_x": ["direct"], "my_thing": ["foo"]}))
        );
    }
}
