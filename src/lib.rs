//! Transync - translation import/export for PHP-array and JSON locale files
//!
//! Transync loads Laravel-style locale directories (`<locale>/<file>.php`,
//! `<locale>.json` and `vendor/<package>/...`) into a translation store,
//! lets the store be edited through a validated catalog, and writes it back
//! out as locale files.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Configuration file loading and workspace resolution
//! - `core`: Parsing, loading, import, export and the translation store
//! - `error`: Error types shared by every layer
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mcp;

pub use error::{Error, Result};
