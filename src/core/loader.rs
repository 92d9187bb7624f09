//! Loading a language directory tree into memory.
//!
//! The loader walks every library found by the scanner, parses each source
//! and merges all locales of the same `(vendor, filename)` into one
//! [`LoadedTranslationFile`].

use std::{collections::HashSet, path::Path};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::{
    model::{Translations, file_identity},
    parsers::parse_translations,
    scanner::{self, SourceFile},
};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Keep empty-string values (and files without any values).
    pub include_empty: bool,
    /// Only load these locales. `None` loads every locale found.
    pub only_locales: Option<Vec<String>>,
}

impl LoadOptions {
    pub fn allows_locale(&self, locale: &str) -> bool {
        match &self.only_locales {
            Some(locales) => locales.iter().any(|l| l == locale),
            None => true,
        }
    }
}

/// All translations of one logical file across every loaded locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTranslationFile {
    pub vendor: Option<String>,
    pub filename: String,
    /// key -> locale -> value
    pub translations: IndexMap<String, Translations>,
}

impl LoadedTranslationFile {
    pub fn new(vendor: Option<String>, filename: impl Into<String>) -> Self {
        Self {
            vendor,
            filename: filename.into(),
            translations: IndexMap::new(),
        }
    }

    pub fn add_translation(
        &mut self,
        key: impl Into<String>,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.translations
            .entry(key.into())
            .or_default()
            .insert(locale.into(), value.into());
    }

    pub fn has_translations(&self) -> bool {
        !self.translations.is_empty()
    }

    pub fn identity(&self) -> String {
        file_identity(self.vendor.as_deref(), &self.filename)
    }

    pub fn get(&self, key: &str, locale: &str) -> Option<&str> {
        self.translations
            .get(key)
            .and_then(|t| t.get(locale))
            .map(String::as_str)
    }
}

type FileIdentity = (Option<String>, String);

/// Builds [`LoadedTranslationFile`] records from a directory tree.
pub struct FileLoader {
    options: LoadOptions,
    records: IndexMap<FileIdentity, LoadedTranslationFile>,
    /// Identities in the order their record first qualified for the output.
    qualified: Vec<FileIdentity>,
    qualified_set: HashSet<FileIdentity>,
}

impl FileLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            records: IndexMap::new(),
            qualified: Vec::new(),
            qualified_set: HashSet::new(),
        }
    }

    pub fn load(mut self, root: &Path) -> Result<Vec<LoadedTranslationFile>> {
        for source in scanner::scan(root)? {
            self.load_source(&source)?;
        }

        let mut records = self.records;
        let files: Vec<LoadedTranslationFile> = self
            .qualified
            .iter()
            .filter_map(|identity| records.swap_remove(identity))
            .collect();

        info!(files = files.len(), root = %root.display(), "loaded translation files");
        Ok(files)
    }

    fn load_source(&mut self, source: &SourceFile) -> Result<()> {
        if !self.options.allows_locale(&source.locale) {
            debug!(path = %source.path.display(), locale = %source.locale, "skipping locale");
            return Ok(());
        }

        let entries = parse_translations(&source.path, source.format)?;
        debug!(path = %source.path.display(), entries = entries.len(), "parsed source");

        let identity = (source.vendor.clone(), source.filename.clone());
        let record = self
            .records
            .entry(identity.clone())
            .or_insert_with(|| LoadedTranslationFile::new(source.vendor.clone(), &source.filename));

        for (key, value) in entries {
            if value.is_empty() && !self.options.include_empty {
                continue;
            }
            record.add_translation(key, source.locale.as_str(), value);
        }

        if (record.has_translations() || self.options.include_empty)
            && self.qualified_set.insert(identity.clone())
        {
            self.qualified.push(identity);
        }

        Ok(())
    }
}

/// Load every translation file below `root`.
pub fn load(root: &Path, options: LoadOptions) -> Result<Vec<LoadedTranslationFile>> {
    FileLoader::new(options).load(root)
}
