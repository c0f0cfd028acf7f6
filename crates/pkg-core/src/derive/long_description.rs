//! Long description materialization
//!
//! When `long_description` names a readable file relative to the project
//! root, its content is read once and cached. The descriptor then reads the
//! same file at build time instead of embedding a literal that could go
//! stale.

use crate::config::Config;
use pkg_fs::io;

/// Materialization state of `long_description`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongDescription {
    source: Option<String>,
    content: Option<String>,
}

impl LongDescription {
    /// Whether the attribute was read from a file.
    pub fn is_materialized(&self) -> bool {
        self.content.is_some()
    }

    /// The file path the content came from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Cached file content.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Python statements that read the file into `long_description`,
    /// placed right before the `setup(` call.
    pub fn read_fragment(&self) -> Option<String> {
        self.content.as_ref()?;
        let source = self.source.as_deref()?;
        let escaped = source.replace('\\', "\\\\").replace('"', "\\\"");
        Some(format!(
            "with io.open(\"{escaped}\", encoding=\"utf-8\") as opendescr:\n    long_description=opendescr.read()\n\n\n"
        ))
    }
}

pub(crate) fn materialize(config: &mut Config) {
    let Some(value) = config.str_attr("long_description").map(str::to_string) else {
        config.long_description = LongDescription::default();
        return;
    };
    if config.long_description.is_materialized()
        && config.long_description.source() == Some(value.as_str())
    {
        return;
    }
    config.long_description = probe(config, value);
}

fn probe(config: &Config, value: String) -> LongDescription {
    let not_a_file = LongDescription::default();
    if value.is_empty() || value.contains('\n') {
        return not_a_file;
    }

    let path = config.root().join(&value);
    if !path.is_file() {
        return not_a_file;
    }
    match io::read_text(&path) {
        Ok(content) => {
            tracing::debug!(%path, bytes = content.len(), "Long description read from file");
            LongDescription {
                source: Some(value),
                content: Some(content),
            }
        }
        Err(e) => {
            tracing::debug!(%path, error = %e, "Long description file unreadable, using literal");
            not_a_file
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge_at;
    use pkg_fs::NormalizedPath;
    use serde_json::{Map, json};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, long_description: &str) -> Config {
        let explicit = Map::from_iter([
            ("name".to_string(), json!("demo")),
            ("long_description".to_string(), json!(long_description)),
        ]);
        merge_at(NormalizedPath::new(dir.path()), Map::new(), explicit).unwrap()
    }

    #[test]
    fn test_file_is_read_once() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.rst"), "Demo\n====\n").unwrap();

        let mut config = config_in(&dir, "README.rst");
        assert_eq!(config.long_description().content(), Some("Demo\n====\n"));

        std::fs::write(dir.path().join("README.rst"), "changed").unwrap();
        config.verify().unwrap();
        assert_eq!(config.long_description().content(), Some("Demo\n====\n"));
        assert_eq!(config.str_attr("long_description"), Some("README.rst"));
    }

    #[test]
    fn test_read_fragment() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.rst"), "Demo").unwrap();

        let config = config_in(&dir, "README.rst");
        assert_eq!(
            config.long_description().read_fragment().as_deref(),
            Some(
                "with io.open(\"README.rst\", encoding=\"utf-8\") as opendescr:\n    long_description=opendescr.read()\n\n\n"
            )
        );
    }

    #[test]
    fn test_missing_file_stays_literal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "README.rst");

        assert!(!config.long_description().is_materialized());
        assert_eq!(config.long_description().read_fragment(), None);
    }

    #[test]
    fn test_directory_is_not_read() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let config = config_in(&dir, "docs");
        assert!(!config.long_description().is_materialized());
    }
}
