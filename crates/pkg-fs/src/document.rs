//! Commented JSON documents
//!
//! Metadata and site-defaults files are JSON objects that may carry
//! full-line `#` comments. Loading is deliberately soft: a document that
//! cannot be parsed (even after stripping comments) is logged and treated
//! as empty, so a broken site-defaults file never aborts a build.

use crate::{Error, NormalizedPath, Result, io};
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#").expect("Invalid comment line regex"));

/// Remove every line whose first non-blank character is `#`.
pub fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !COMMENT_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse commented JSON text into an object.
///
/// The first attempt assumes no comments. On failure the comment lines are
/// stripped and parsing is retried. If both fail, or the top level is not
/// an object, an empty map is returned. `origin` names the source in logs.
pub fn parse_commented_json(content: &str, origin: &str) -> Map<String, Value> {
    let parsed = match serde_json::from_str::<Value>(content) {
        Ok(value) => Some(value),
        Err(first) => {
            tracing::debug!(%origin, error = %first, "Commented JSON? Retrying without comments");
            match serde_json::from_str::<Value>(&strip_comment_lines(content)) {
                Ok(value) => Some(value),
                Err(second) => {
                    tracing::error!(%origin, error = %second, "Error reading JSON");
                    None
                }
            }
        }
    };

    match parsed {
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!(%origin, kind = json_kind(&other), "Expected a JSON object, ignoring document");
            Map::new()
        }
        None => Map::new(),
    }
}

/// Load a commented JSON document from disk.
///
/// A missing or unreadable file yields an empty map.
pub fn load_commented_json(path: &NormalizedPath) -> Map<String, Value> {
    if !path.is_file() {
        tracing::debug!(%path, "Document not found");
        return Map::new();
    }
    match io::read_text(path) {
        Ok(content) => parse_commented_json(&content, path.as_str()),
        Err(e) => {
            tracing::warn!(%path, error = %e, "Could not read document");
            Map::new()
        }
    }
}

/// Save an object as a commented JSON document.
///
/// Each banner line is written as a `# ` comment before the body, which is
/// pretty printed with four-space indentation.
pub fn save_commented_json(
    path: &NormalizedPath,
    banner: &[String],
    document: &Map<String, Value>,
) -> Result<()> {
    let mut body = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| Error::JsonSerialize {
            path: path.to_native(),
            message: e.to_string(),
        })?;

    let mut content = String::new();
    for line in banner {
        content.push_str("# ");
        content.push_str(line);
        content.push('\n');
    }
    content.push_str(&String::from_utf8_lossy(&body));
    content.push('\n');

    io::write_text(path, &content)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
