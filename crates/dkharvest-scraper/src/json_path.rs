//! Default-on-miss traversal over loosely-structured API payloads.
//!
//! The Digikala endpoints are schema-unstable: fields move between payload
//! versions, nest differently, or vanish. Every other module reads payloads
//! through these helpers instead of indexing into [`Value`] directly, so a
//! malformed document degrades to "field absent" rather than a panic.

use serde_json::Value;

/// Descends `doc` key by key. Returns `None` as soon as the current value
/// is not an object or lacks the key.
#[must_use]
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = doc;
    for key in path {
        cur = cur.as_object()?.get(*key)?;
    }
    Some(cur)
}

/// Evaluates candidate paths in priority order and returns the first hit
/// that is present and non-null.
#[must_use]
pub fn first_of<'a>(doc: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(doc, path))
        .find(|v| !v.is_null())
}

/// Integer coercion for payload scalars: accepts JSON integers, floats with
/// no fractional part, and numeric strings.
#[must_use]
pub fn as_i64_loose(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Float coercion for payload scalars: accepts any JSON number or a
/// numeric string.
#[must_use]
pub fn as_f64_loose(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String rendering for payload scalars. Strings pass through; numbers are
/// formatted (comment ids arrive as either). Objects, arrays, and nulls
/// stay absent.
#[must_use]
pub fn as_string_loose(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
