//! Prompt input coercion
//!
//! Turns one line of text typed by a user into a raw attribute value that
//! can then go through the regular merge and verify pipeline.

use crate::coerce::{construct, verify};
use crate::literal::truthy;
use crate::schema::{Contract, ScalarKind};
use crate::{Error, Result};
use serde_json::Value;

const LIST_SEPARATORS: [char; 5] = [',', ';', ':', '|', ' '];

/// Coerce user text for `key` towards its `contract`.
///
/// Empty input yields `None`, meaning "leave the attribute unset".
pub fn coerce_input(text: &str, key: &str, contract: &Contract) -> Result<Option<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let is_require = key.contains("require") && !key.contains("extras");
    let value = match contract {
        _ if is_require => split_list(text),
        Contract::ListOfString => split_list(text),
        Contract::Mapping(..) => parse_literal(text).ok_or_else(|| Error::InvalidInput {
            key: key.to_string(),
            message: format!("could not parse {text:?} as a mapping literal"),
        })?,
        Contract::Scalar(ScalarKind::Bool) => {
            let truth = parse_literal(text).map_or(true, |literal| truthy(&literal));
            Value::Bool(truth)
        }
        Contract::Scalar(kind) => {
            let raw = Value::String(text.to_string());
            construct(&raw, *kind).ok_or_else(|| Error::mismatch(key, kind.name(), "str"))?
        }
        Contract::OneOf(_) => verify(key, &Value::String(text.to_string()), contract)?,
    };
    Ok(Some(value))
}

/// Split on the first separator present and sort the pieces.
fn split_list(text: &str) -> Value {
    let mut items: Vec<String> = match LIST_SEPARATORS.iter().find(|sep| text.contains(**sep)) {
        Some(sep) => text
            .split(*sep)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![text.to_string()],
    };
    items.sort();
    Value::Array(items.into_iter().map(Value::String).collect())
}

/// Parse JSON, or a Python literal (single quotes, `True`/`False`/`None`,
/// trailing commas).
pub fn parse_literal(text: &str) -> Option<Value> {
    serde_json::from_str(text)
        .ok()
        .or_else(|| serde_json::from_str(&python_to_json(text)?).ok())
}

fn python_to_json(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let quote = c;
                out.push('"');
                loop {
                    match chars.next()? {
                        '\\' => {
                            let escaped = chars.next()?;
                            if escaped == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(escaped);
                            }
                        }
                        '"' if quote == '\'' => out.push_str("\\\""),
                        ch if ch == quote => break,
                        ch => out.push(ch),
                    }
                }
                out.push('"');
            }
            ',' => {
                let mut lookahead = chars.clone();
                while lookahead.peek().is_some_and(|ch| ch.is_whitespace()) {
                    lookahead.next();
                }
                if !matches!(lookahead.peek(), Some(']') | Some('}')) {
                    out.push(',');
                }
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(ch) = chars.next_if(|ch| ch.is_ascii_alphanumeric() || *ch == '_') {
                    word.push(ch);
                }
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            c => out.push(c),
        }
    }
    Some(out)
}
