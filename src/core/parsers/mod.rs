pub mod json;
pub mod php;

use std::path::Path;

use indexmap::IndexMap;

use crate::core::keys::flatten;
use crate::core::scanner::SourceFormat;
use crate::error::Result;

pub use json::{parse_json_file, parse_json_source};
pub use php::{parse_php_file, parse_php_source};

/// Parse a locale file into flat `key -> value` pairs.
///
/// PHP arrays are flattened to dot-joined keys; JSON keys are kept verbatim.
pub fn parse_translations(path: &Path, format: SourceFormat) -> Result<IndexMap<String, String>> {
    match format {
        SourceFormat::Php => Ok(flatten(&parse_php_file(path)?)),
        SourceFormat::Json => parse_json_file(path),
    }
}
