//! Conversion between nested translation arrays and dot-joined keys.
//!
//! PHP translation files are nested arrays; the store keeps one row per leaf,
//! addressed by the dot-joined path (`login.password`). `flatten` goes from the
//! nested form to rows, `expand`/`insert_nested` go back.

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub const KEY_SEPARATOR: char = '.';

/// Flatten a nested structure into `dot.joined.key -> value` pairs.
///
/// Traversal is depth-first in insertion order. Empty arrays/objects produce
/// no entry. Scalars are cast to strings the way PHP casts them.
pub fn flatten(root: &Map<String, Value>) -> IndexMap<String, String> {
    let mut result = IndexMap::new();
    for (key, value) in root {
        flatten_value(value, join_key(None, key), &mut result);
    }
    result
}

fn flatten_value(value: &Value, path: String, result: &mut IndexMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_value(val, join_key(Some(&path), key), result);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_value(val, join_key(Some(&path), &index.to_string()), result);
            }
        }
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                result.insert(path, text);
            }
        }
    }
}

/// An empty key below a parent still counts as a path segment.
fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, KEY_SEPARATOR, key),
        None => key.to_string(),
    }
}

/// String form of a scalar: null -> "", true -> "1", false -> "".
///
/// Returns `None` for arrays and objects.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Expand dot-joined keys into a nested map.
///
/// Keys where one is a strict prefix of another cannot both be represented;
/// the later one wins. Validated data never contains such pairs.
pub fn expand<I, K, V>(entries: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut root = Map::new();
    for (key, value) in entries {
        insert_nested(&mut root, key.as_ref(), Value::String(value.into()));
    }
    root
}

/// Insert a value at a dot-joined path, creating intermediate maps as needed.
pub fn insert_nested(root: &mut Map<String, Value>, key: &str, value: Value) {
    let parts: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    insert_path(root, &parts, value);
}

fn insert_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        root.insert(first.to_string(), value);
        return;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A leaf on the way down is replaced by a map.
    if !next_level.is_object() {
        *next_level = Value::Object(Map::new());
    }

    if let Value::Object(inner) = next_level {
        insert_path(inner, rest, value);
    }
}

/// The key and all of its ancestor namespaces, outermost first.
///
/// `root.sub.key` -> `["root", "root.sub", "root.sub.key"]`
pub fn namespaces(key: &str) -> Vec<&str> {
    let mut result: Vec<&str> = key
        .match_indices(KEY_SEPARATOR)
        .map(|(index, _)| &key[..index])
        .filter(|ns| !ns.is_empty())
        .collect();
    result.push(key);
    result
}

/// True when `a` and `b` cannot coexist in one nested array: they are equal,
/// or one is a dot-delimited ancestor of the other.
pub fn keys_collide(a: &str, b: &str) -> bool {
    a == b || is_descendant(a, b) || is_descendant(b, a)
}

/// True when `key` lives inside the namespace `ancestor`.
pub fn is_descendant(key: &str, ancestor: &str) -> bool {
    key.len() > ancestor.len()
        && key.starts_with(ancestor)
        && key[ancestor.len()..].starts_with(KEY_SEPARATOR)
}

pub fn has_edge_separator(key: &str) -> bool {
    key.starts_with(KEY_SEPARATOR) || key.ends_with(KEY_SEPARATOR)
}
