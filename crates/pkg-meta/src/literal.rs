//! Python literal rendering for JSON values
//!
//! The descriptor is Python source, so attribute values are written as
//! Python literals. `repr` gives the single-line form; `pretty` wraps
//! collections that do not fit on one line.

use serde_json::{Map, Number, Value};

/// Column limit for a single-line literal.
pub const WIDTH: usize = 80;

/// Python type name of a raw value, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// The `str()` of a value: strings are returned bare, anything else as
/// its literal.
pub fn py_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr(other),
    }
}

/// Python truthiness.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Single-line literal, mapping keys in insertion order.
pub fn repr(value: &Value) -> String {
    render_flat(value, false)
}

/// Single-line literal with mapping keys sorted.
pub fn repr_sorted(value: &Value) -> String {
    render_flat(value, true)
}

/// Literal for a keyword argument written at `indent` columns.
///
/// A collection whose sorted single-line literal exceeds [`WIDTH`] is
/// wrapped: the opening bracket stays on the current line, each element
/// goes on its own line indented one level deeper, and the closing bracket
/// lines up with `indent`.
pub fn pretty(value: &Value, indent: usize) -> String {
    let flat = repr_sorted(value);
    if flat.chars().count() <= WIDTH || !is_collection(value) {
        return flat;
    }
    wrap(value, indent)
}

fn is_collection(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

fn wrap(value: &Value, indent: usize) -> String {
    let inner = indent + 4;
    let pad = " ".repeat(inner);
    let (open, close, lines) = match value {
        Value::Array(items) => (
            '[',
            ']',
            items
                .iter()
                .map(|item| format!("{pad}{}", nested(item, inner)))
                .collect::<Vec<_>>(),
        ),
        Value::Object(map) => (
            '{',
            '}',
            sorted_entries(map)
                .into_iter()
                .map(|(k, v)| format!("{pad}{}: {}", str_repr(k), nested(v, inner)))
                .collect::<Vec<_>>(),
        ),
        other => return repr_sorted(other),
    };
    format!("{open}\n{}\n{}{close}", lines.join(",\n"), " ".repeat(indent))
}

fn nested(value: &Value, indent: usize) -> String {
    let flat = repr_sorted(value);
    if indent + flat.chars().count() <= WIDTH || !is_collection(value) {
        flat
    } else {
        wrap(value, indent)
    }
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn render_flat(value: &Value, sort_keys: bool) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number_repr(n),
        Value::String(s) => str_repr(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(|i| render_flat(i, sort_keys)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<(&String, &Value)> = if sort_keys {
                sorted_entries(map)
            } else {
                map.iter().collect()
            };
            let parts: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}: {}", str_repr(k), render_flat(v, sort_keys)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn number_repr(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => float_repr(f),
        _ => n.to_string(),
    }
}

/// Python's float repr: shortest round-trip digits, always with a decimal
/// point or exponent.
pub fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{f:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or_default();
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => formatted,
        };
    }
    format!("{f:?}")
}

/// Python's string repr: single quotes unless the text contains a single
/// quote and no double quote.
pub fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_scalar_reprs() {
        assert_eq!(repr(&json!(null)), "None");
        assert_eq!(repr(&json!(true)), "True");
        assert_eq!(repr(&json!(3)), "3");
        assert_eq!(repr(&json!(3.14)), "3.14");
        assert_eq!(repr(&json!(1.0)), "1.0");
        assert_eq!(repr(&json!("demo")), "'demo'");
    }

    #[test]
    fn test_float_exponents() {
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1.5e-5), "1.5e-05");
        assert_eq!(float_repr(0.0001), "0.0001");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(str_repr("it's"), "\"it's\"");
        assert_eq!(str_repr("say \"hi\" it's"), "'say \"hi\" it\\'s'");
        assert_eq!(str_repr("a\\b\nc"), "'a\\\\b\\nc'");
    }

    #[test]
    fn test_collections() {
        assert_eq!(repr(&json!(["a", 1, null])), "['a', 1, None]");
        assert_eq!(repr(&json!({"b": [1], "a": "x"})), "{'b': [1], 'a': 'x'}");
        assert_eq!(repr_sorted(&json!({"b": [1], "a": "x"})), "{'a': 'x', 'b': [1]}");
    }

    #[test]
    fn test_pretty_short_value_stays_flat() {
        assert_eq!(pretty(&json!(["pytest", "pytest-cov"]), 4), "['pytest', 'pytest-cov']");
    }

    #[test]
    fn test_pretty_measures_characters() {
        let value = json!(["ééééééééééééé", "ééééééééééééé", "ééééééééééééé", "ééééééééééééé"]);
        let flat = repr_sorted(&value);
        assert!(flat.len() > WIDTH);
        assert_eq!(pretty(&value, 4), flat);
    }

    #[test]
    fn test_pretty_wraps_long_lists() {
        let value = json!([
            "really long string that will require multiple lines-0",
            "really long string that will require multiple lines-1",
            "really long string that will require multiple lines-2",
            "really long string that will require multiple lines-3",
            "really long string that will require multiple lines-4",
        ]);
        assert_eq!(
            pretty(&value, 4),
            "[
        'really long string that will require multiple lines-0',
        'really long string that will require multiple lines-1',
        'really long string that will require multiple lines-2',
        'really long string that will require multiple lines-3',
        'really long string that will require multiple lines-4'
    ]"
        );
    }

    #[test]
    fn test_pretty_wraps_nested_mappings() {
        let value = json!({
            "console_scripts": [
                "demo-build = demo.commands:build_everything_in_the_project",
                "demo-clean = demo.commands:clean_everything_in_the_project",
            ]
        });
        assert_eq!(
            pretty(&value, 4),
            "{
        'console_scripts': [
            'demo-build = demo.commands:build_everything_in_the_project',
            'demo-clean = demo.commands:clean_everything_in_the_project'
        ]
    }"
        );
    }
}
