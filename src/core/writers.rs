//! Serialization of locale files.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

const INDENT: &str = "    ";

/// Render a nested map as a PHP file returning a short-syntax array.
///
/// Every element ends with a trailing comma and strings are single-quoted,
/// so the output is stable across runs.
pub fn render_php(root: &Map<String, Value>) -> String {
    let mut out = String::from("<?php\n\nreturn [\n");
    write_php_entries(&mut out, root, 1);
    out.push_str("];\n");
    out
}

fn write_php_entries(out: &mut String, map: &Map<String, Value>, depth: usize) {
    let indent = INDENT.repeat(depth);

    for (key, value) in map {
        out.push_str(&indent);
        out.push_str(&php_string(key));
        out.push_str(" => ");

        match value {
            Value::Object(inner) => {
                out.push_str("[\n");
                write_php_entries(out, inner, depth + 1);
                out.push_str(&indent);
                out.push(']');
            }
            Value::String(s) => out.push_str(&php_string(s)),
            other => out.push_str(&php_string(&other.to_string())),
        }
        out.push_str(",\n");
    }
}

/// Single-quoted PHP string literal.
pub fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render flat JSON translations with 2-space indentation and a trailing newline.
pub fn render_json(entries: &IndexMap<String, String>) -> Result<String> {
    let content = serde_json::to_string_pretty(entries).map_err(|source| Error::Serialize {
        what: "JSON translations",
        source,
    })?;
    Ok(format!("{}\n", content))
}
