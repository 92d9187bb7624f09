//! Import/export engine: scanning, parsing, reconciliation and serialization
//! of translation files.

pub mod catalog;
pub mod exporter;
pub mod importer;
pub mod keys;
pub mod loader;
pub mod model;
pub mod parsers;
pub mod scanner;
pub mod store;
pub mod writers;
