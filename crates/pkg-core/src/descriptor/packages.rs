//! Package discovery
//!
//! The descriptor may carry a `find_packages(...)` call in place of an
//! explicit package list. For direct use the call is parsed into its
//! exclude patterns and run natively; it is never evaluated.

use pkg_fs::NormalizedPath;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

/// Packages excluded when discovery is synthesized.
pub const DEFAULT_EXCLUDES: [&str; 2] = ["test", "tests"];

static FIND_PACKAGES_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*find_packages\(\s*(?:(?:exclude\s*=\s*)?[\[(]([^\])]*)[\])]\s*,?\s*)?\)\s*$")
        .expect("Invalid find_packages call regex")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("Invalid quoted string regex"));

/// Parse the exclude patterns out of a `find_packages(...)` call.
///
/// Accepts `find_packages()`, `find_packages(exclude=[...])` and the
/// positional or tuple forms. Anything else yields `None`.
pub fn parse_find_packages(call: &str) -> Option<Vec<String>> {
    let caps = FIND_PACKAGES_CALL.captures(call)?;
    let Some(items) = caps.get(1) else {
        return Some(Vec::new());
    };

    let patterns: Vec<String> = QUOTED
        .captures_iter(items.as_str())
        .filter_map(|item| item.get(1).or_else(|| item.get(2)))
        .map(|pattern| pattern.as_str().to_string())
        .collect();

    // Every comma separated element must have been a quoted string
    let elements = items
        .as_str()
        .split(',')
        .filter(|element| !element.trim().is_empty())
        .count();
    (elements == patterns.len()).then_some(patterns)
}

/// Find Python packages below `root`, as dotted names.
///
/// A directory is a package when it holds an `__init__.py`. Discovery only
/// descends into packages, and keeps descending below excluded ones.
pub fn find_packages(root: &NormalizedPath, exclude: &[String]) -> Vec<String> {
    let patterns: Vec<Regex> = exclude.iter().filter_map(|p| glob_regex(p)).collect();
    let mut found = Vec::new();
    walk(root, None, &patterns, &mut found);
    found
}

fn walk(dir: &NormalizedPath, prefix: Option<&str>, exclude: &[Regex], found: &mut Vec<String>) {
    let entries = match fs::read_dir(dir.to_native()) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir, error = %e, "Skipping unreadable directory");
            return;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        if name.contains('.') || !path.join("__init__.py").is_file() {
            continue;
        }
        let package = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.clone(),
        };
        if !exclude.iter().any(|pattern| pattern.is_match(&package)) {
            found.push(package.clone());
        }
        walk(&path, Some(&package), exclude, found);
    }
}

/// fnmatch-style pattern (`*`, `?`) as an anchored regex.
fn glob_regex(pattern: &str) -> Option<Regex> {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    Regex::new(&format!("^{escaped}$")).ok()
}
