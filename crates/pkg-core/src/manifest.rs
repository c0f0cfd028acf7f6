//! MANIFEST.in entries for data files
//!
//! Files named by `package_data` and `data_files` are only shipped in a
//! source distribution when `MANIFEST.in` includes them.

use crate::config::Config;
use crate::{Error, Result};
use pkg_fs::{NormalizedPath, ProjectFile, io};
use pkg_meta::literal::repr;
use serde_json::Value;

/// `include <file>` lines for data files not already in `existing`.
///
/// `data_files` entries must be `[directory, [files]]` pairs.
pub fn manifest_includes(config: &Config, existing: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    if let Some(Value::Object(package_data)) = config.get("package_data") {
        for patterns in package_data.values() {
            if let Value::Array(patterns) = patterns {
                files.extend(patterns.iter().filter_map(Value::as_str));
            }
        }
    }

    if let Some(data_files) = config.get("data_files") {
        let malformed = || Error::MalformedDataFiles {
            value: repr(data_files),
        };
        let Value::Array(entries) = data_files else {
            return Err(malformed());
        };
        for entry in entries {
            let Some([Value::String(_), Value::Array(entry_files)]) =
                entry.as_array().map(Vec::as_slice)
            else {
                return Err(malformed());
            };
            for file in entry_files {
                files.push(file.as_str().ok_or_else(malformed)?);
            }
        }
    }

    let mut includes: Vec<String> = Vec::new();
    for file in files {
        let line = format!("include {file}");
        if !existing.contains(&line) && !includes.contains(&line) {
            includes.push(line);
        }
    }
    Ok(includes)
}

/// Lines of the project's `MANIFEST.in`, empty when there is none.
pub fn read_manifest(root: &NormalizedPath) -> Vec<String> {
    let path = root.join(ProjectFile::Manifest.as_str());
    io::read_text(&path)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Append the missing include lines to `MANIFEST.in`.
///
/// Returns the lines that were added; the file is left untouched when
/// there are none.
pub fn update_manifest(config: &Config, root: &NormalizedPath) -> Result<Vec<String>> {
    let mut lines = read_manifest(root);
    let includes = manifest_includes(config, &lines)?;
    if includes.is_empty() {
        return Ok(includes);
    }

    lines.extend(includes.iter().cloned());
    let path = root.join(ProjectFile::Manifest.as_str());
    io::write_text(&path, &format!("{}\n", lines.join("\n")))?;
    tracing::info!(%path, added = includes.len(), "Updated manifest");
    Ok(includes)
}
