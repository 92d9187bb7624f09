//! Parser for `<locale>.json` translation files.
//!
//! JSON translation files are flat objects whose keys are the source strings
//! themselves (`{"Welcome back!": "Welkom terug!"}`), so keys are never split
//! on dots. Nested values are rejected.

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::core::keys::scalar_to_string;
use crate::error::{Error, ParseError, Result};

pub fn parse_json_file(path: &Path) -> Result<IndexMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
    Ok(parse_json_source(&content, path)?)
}

/// Parse a JSON translation file into `key -> value` pairs in file order.
///
/// An empty (or whitespace-only) file is treated as `{}`.
pub fn parse_json_source(
    content: &str,
    path: &Path,
) -> Result<IndexMap<String, String>, ParseError> {
    let trimmed = content.trim_start_matches('\u{feff}');
    if trimmed.trim().is_empty() {
        return Ok(IndexMap::new());
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| {
        ParseError::at_line(path, trimmed, e.line(), e.column(), strip_position(&e))
    })?;

    let Value::Object(map) = value else {
        return Err(ParseError::at_line(
            path,
            trimmed,
            1,
            1,
            "JSON translation file must contain an object",
        ));
    };

    flat_entries(map, trimmed, path)
}

fn flat_entries(
    map: Map<String, Value>,
    content: &str,
    path: &Path,
) -> Result<IndexMap<String, String>, ParseError> {
    let mut entries = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let Some(text) = scalar_to_string(&value) else {
            let line = locate_key(content, &key);
            return Err(ParseError::at_line(
                path,
                content,
                line,
                1,
                format!("value of \"{}\" must be a string", key),
            ));
        };
        entries.insert(key, text);
    }
    Ok(entries)
}

/// Best effort line lookup for a key, used only for error reporting.
fn locate_key(content: &str, key: &str) -> usize {
    let Ok(quoted) = serde_json::to_string(key) else {
        return 1;
    };
    content
        .lines()
        .position(|line| line.contains(&quoted))
        .map(|index| index + 1)
        .unwrap_or(1)
}

/// serde_json appends " at line X column Y" to its messages; the report
/// shows the location separately.
fn strip_position(error: &serde_json::Error) -> String {
    let message = error.to_string();
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message,
    }
}
