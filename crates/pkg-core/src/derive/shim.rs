//! PKG-INFO metadata shim
//!
//! setuptools has no keywords for a release's source label or url. When
//! either is configured, the descriptor carries a small `Metadata` class
//! that writes them into `PKG-INFO` alongside the standard fields.

use crate::Result;
use crate::config::Config;
use pkg_fs::{NormalizedPath, ProjectFile, io};
use pkg_meta::literal::{py_str, repr, truthy};
use serde_json::Value;

const UNKNOWN: &str = "UNKNOWN";

/// Fields written into PKG-INFO, in order.
const PKG_INFO_FIELDS: [&str; 11] = [
    "name",
    "version",
    "summary",
    "home_page",
    "author",
    "author_email",
    "license",
    "description",
    "platform",
    "source_label",
    "source_url",
];

/// Snapshot of the metadata a PKG-INFO shim writes.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataShim {
    pub metadata_version: String,
    pub generator: String,
    pub name: Value,
    pub version: Value,
    pub summary: Value,
    pub home_page: Value,
    pub author: Value,
    pub author_email: Value,
    pub license: Value,
    pub platforms: Value,
    pub keywords: Value,
    pub source_label: Value,
    pub source_url: Value,
}

impl MetadataShim {
    /// Build the shim when `source_label` or `source_url` is non-empty.
    pub fn from_config(config: &Config) -> Option<Self> {
        let enabled = ["source_label", "source_url"]
            .iter()
            .any(|key| config.get(key).is_some_and(truthy));
        if !enabled {
            return None;
        }

        let field = |key: &str| {
            config
                .get(key)
                .or_else(|| config.unknown().get(key))
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN))
        };
        Some(Self {
            metadata_version: "2.0".to_string(),
            generator: format!("pkgmeta ({})", env!("CARGO_PKG_VERSION")),
            name: field("name"),
            version: field("version"),
            summary: field("description"),
            home_page: field("url"),
            author: field("author"),
            author_email: field("author_email"),
            license: field("license"),
            platforms: field("platforms"),
            keywords: config
                .get("keywords")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
            source_label: field("source_label"),
            source_url: field("source_url"),
        })
    }

    fn field(&self, name: &str) -> &Value {
        match name {
            "name" => &self.name,
            "version" => &self.version,
            "summary" | "description" => &self.summary,
            "home_page" => &self.home_page,
            "author" => &self.author,
            "author_email" => &self.author_email,
            "license" => &self.license,
            "platform" => &self.platforms,
            "source_label" => &self.source_label,
            _ => &self.source_url,
        }
    }

    /// PKG-INFO document text.
    pub fn pkg_info(&self) -> String {
        let mut out = String::from("Metadata-Version: 1.0\n");
        for name in PKG_INFO_FIELDS {
            out.push_str(&format!("{}: {}\n", header(name), py_str(self.field(name))));
        }
        out
    }

    /// Write PKG-INFO into an egg-info directory.
    pub fn write_pkg_info(&self, egg_info: &NormalizedPath) -> Result<NormalizedPath> {
        let path = egg_info.join(ProjectFile::PkgInfo.as_str());
        io::write_text(&path, &self.pkg_info())?;
        tracing::info!(%path, "Wrote PKG-INFO");
        Ok(path)
    }

    /// Python class definition embedded in the descriptor.
    pub fn class_source(&self) -> String {
        let text = |s: &str| repr(&Value::from(s));
        format!(
            r#"
class Metadata(object):
    """Metadata object class to shim the early stages of PKG-INFO writing."""

    def __init__(self):
        self.metadata_version = {metadata_version}
        self.generator = {generator}
        self.name = {name}
        self.version = {version}
        self.summary = {summary}
        self.description = {summary}
        self.home_page = {home_page}
        self.url = {home_page}
        self.author = {author}
        self.author_email = {author_email}
        self.license = {license}
        self.platforms = {platforms}
        self.platform = {platforms}
        self.keywords = {keywords}
        self.source_label = {source_label}
        self.source_url = {source_url}

    def write_pkg_info(self, egg_info):
        """Include pkgmeta custom metadata in PKG-INFO."""

        if sys.version_info > (3,):
            UNICODE = str
        else:
            UNICODE = unicode

        pkg_info = os.path.join(egg_info, "PKG-INFO")
        info_attrs = ["name", "version", "summary", "home_page",
                      "author", "author_email", "license",
                      "description", "platform", "source_label",
                      "source_url"]
        with io.open(pkg_info, "w", encoding="utf-8") as openinfo:
            openinfo.write(UNICODE("Metadata-Version: 1.0\n"))
            for attr in info_attrs:
                openinfo.write(UNICODE("{{}}{{}}: {{}}\n".format(
                    attr[0].upper(),
                    "".join(attr[1:]).replace("_", "-"),
                    getattr(self, attr),
                )))
"#,
            metadata_version = text(&self.metadata_version),
            generator = text(&self.generator),
            name = repr(&self.name),
            version = repr(&self.version),
            summary = repr(&self.summary),
            home_page = repr(&self.home_page),
            author = repr(&self.author),
            author_email = repr(&self.author_email),
            license = repr(&self.license),
            platforms = repr(&self.platforms),
            keywords = repr(&self.keywords),
            source_label = repr(&self.source_label),
            source_url = repr(&self.source_url),
        )
    }
}

/// `home_page` -> `Home-page`
fn header(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}",
            first.to_ascii_uppercase(),
            chars.as_str().replace('_', "-")
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge;
    use serde_json::{Map, json};
    use tempfile::TempDir;

    fn config(values: Value) -> Config {
        let Value::Object(explicit) = values else {
            panic!("expected an object");
        };
        merge(Map::new(), explicit).unwrap()
    }

    #[test]
    fn test_no_shim_without_source() {
        let config = config(json!({"name": "demo", "source_label": ""}));
        assert!(config.metadata().is_none());
    }

    #[test]
    fn test_pkg_info_fields() {
        let config = config(json!({
            "name": "demo",
            "version": "1.0.0",
            "source_label": "abc123",
            "source_url": "https://example.com/demo/abc123",
        }));
        let pkg_info = config.metadata().unwrap().pkg_info();

        assert!(pkg_info.starts_with("Metadata-Version: 1.0\nName: demo\nVersion: 1.0.0\n"));
        assert!(pkg_info.contains("Home-page: UNKNOWN\n"));
        assert!(pkg_info.contains("Author-email: UNKNOWN\n"));
        assert!(pkg_info.contains("Source-label: abc123\n"));
        assert!(pkg_info.contains("Source-url: https://example.com/demo/abc123\n"));
    }

    #[test]
    fn test_license_comes_from_unknown_attributes() {
        let config = config(json!({"name": "demo", "license": "MIT", "source_label": "v1"}));
        assert_eq!(config.metadata().unwrap().license, json!("MIT"));
    }

    #[test]
    fn test_write_pkg_info() {
        let dir = TempDir::new().unwrap();
        let config = config(json!({"name": "demo", "source_url": "https://example.com"}));
        let egg_info = NormalizedPath::new(dir.path()).join("demo.egg-info");

        let path = config.metadata().unwrap().write_pkg_info(&egg_info).unwrap();
        let written = std::fs::read_to_string(path.to_native()).unwrap();
        assert!(written.contains("Source-url: https://example.com\n"));
        assert!(written.contains("Source-label: UNKNOWN\n"));
    }

    #[test]
    fn test_class_source() {
        let config = config(json!({"name": "demo", "keywords": ["a"], "source_label": "v1"}));
        let source = config.metadata().unwrap().class_source();

        assert!(source.starts_with("\nclass Metadata(object):\n"));
        assert!(source.contains("        self.name = 'demo'\n"));
        assert!(source.contains("        self.keywords = ['a']\n"));
        assert!(source.contains("        self.source_url = 'UNKNOWN'\n"));
        assert!(source.contains("openinfo.write(UNICODE(\"{}{}: {}\\n\".format("));
    }
}
