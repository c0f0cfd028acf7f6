//! Type coercion against schema contracts
//!
//! `verify` is total and deterministic: the same `(value, contract)` pair
//! always yields the same coerced value or the same error, and verifying an
//! already coerced value returns it unchanged.

use crate::literal::{py_str, truthy, type_name};
use crate::schema::{Contract, ScalarKind, describe_alternatives};
use crate::{Error, Result};
use serde_json::{Map, Number, Value};

/// Coerce `value` into `contract` for the attribute `key`.
pub fn verify(key: &str, value: &Value, contract: &Contract) -> Result<Value> {
    match contract {
        Contract::Mapping(key_kind, value_contract) => match value {
            Value::Object(map) => coerce_mapping(key, map, *key_kind, value_contract),
            other => Err(Error::mismatch(key, "dict", type_name(other))),
        },
        Contract::ListOfString => Ok(match value {
            Value::Array(items) => Value::Array(ensure_list(items)),
            other => Value::Array(vec![Value::String(py_str(other))]),
        }),
        Contract::OneOf(alternatives) => coerce_one_of(key, value, alternatives),
        Contract::Scalar(kind) => {
            if kind.accepts(value) {
                return Ok(value.clone());
            }
            construct(value, *kind).ok_or_else(|| Error::mismatch(key, kind.name(), type_name(value)))
        }
    }
}

/// Stringify every element and drop duplicates, keeping first-seen order.
pub fn ensure_list(items: &[Value]) -> Vec<Value> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let text = py_str(item);
        if !seen.contains(&text) {
            seen.push(text);
        }
    }
    seen.into_iter().map(Value::String).collect()
}

/// Apply a scalar kind's constructor, `None` when the value cannot convert.
pub fn construct(value: &Value, kind: ScalarKind) -> Option<Value> {
    match kind {
        ScalarKind::Any => Some(value.clone()),
        ScalarKind::Str => Some(Value::String(py_str(value))),
        ScalarKind::Bool => Some(Value::Bool(truthy(value))),
        ScalarKind::Int => match value {
            Value::Number(n) if n.is_f64() => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| Value::from(f.trunc() as i64)),
            Value::Number(n) => Some(Value::Number(n.clone())),
            Value::Bool(b) => Some(Value::from(i64::from(*b))),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        ScalarKind::Float => {
            let float = match value {
                Value::Number(n) => n.as_f64(),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            float.and_then(Number::from_f64).map(Value::Number)
        }
    }
}

fn coerce_one_of(key: &str, value: &Value, alternatives: &[Contract]) -> Result<Value> {
    if alternatives.iter().any(|alt| alt.accepts_shape(value)) {
        return Ok(value.clone());
    }

    for alternative in alternatives {
        let attempt = match alternative {
            Contract::ListOfString => Some(Value::Array(vec![value.clone()])),
            Contract::Scalar(kind) => construct(value, *kind),
            Contract::OneOf(nested) => coerce_one_of(key, value, nested).ok(),
            Contract::Mapping(..) => None,
        };
        if let Some(coerced) = attempt {
            tracing::trace!(key, alternative = %alternative, "Coerced through alternative");
            return Ok(coerced);
        }
    }

    Err(Error::mismatch(
        key,
        describe_alternatives(alternatives),
        type_name(value),
    ))
}

fn coerce_mapping(
    key: &str,
    map: &Map<String, Value>,
    key_kind: ScalarKind,
    value_contract: &Contract,
) -> Result<Value> {
    let mut coerced = Map::with_capacity(map.len());
    for (entry_key, entry_value) in map {
        let entry_key = coerce_key(key, entry_key, key_kind)?;
        let entry_name = format!("{key}[{entry_key:?}]");
        let entry_value = match (value_contract, entry_value) {
            (Contract::ListOfString, Value::String(_)) => {
                Value::Array(vec![entry_value.clone()])
            }
            (Contract::ListOfString, Value::Array(items)) => Value::Array(ensure_list(items)),
            (Contract::ListOfString, other) => {
                return Err(Error::mismatch(entry_name, "list", type_name(other)));
            }
            (contract, other) => verify(&entry_name, other, contract)?,
        };
        coerced.insert(entry_key, entry_value);
    }
    Ok(Value::Object(coerced))
}

/// Mapping keys arrive as strings; non-string key kinds must parse.
fn coerce_key(key: &str, entry_key: &str, kind: ScalarKind) -> Result<String> {
    let raw = Value::String(entry_key.to_string());
    match kind {
        ScalarKind::Str | ScalarKind::Any => Ok(entry_key.to_string()),
        other => construct(&raw, other)
            .map(|v| py_str(&v))
            .ok_or_else(|| Error::mismatch(format!("{key} key"), other.name(), "str")),
    }
}
