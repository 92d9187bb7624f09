//! Persisted entities: translation files and their keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type FileId = u64;
pub type KeyId = u64;

/// Filename of the synthetic file that holds flat JSON translations.
pub const JSON_FILENAME: &str = "_json";

/// Locale code -> translated value, in insertion order.
///
/// A missing locale and an empty value are different things: the first was
/// never translated, the second was explicitly left blank.
pub type Translations = IndexMap<String, String>;

/// One logical translation file, identified by `(vendor, filename)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFile {
    pub id: FileId,
    /// `None` is the application's own namespace.
    pub vendor: Option<String>,
    pub filename: String,
}

impl TranslationFile {
    pub fn is_json(&self) -> bool {
        is_json_filename(&self.filename)
    }

    /// Human readable identity, e.g. `auth` or `vendor/package::messages`.
    pub fn identity(&self) -> String {
        file_identity(self.vendor.as_deref(), &self.filename)
    }
}

pub fn is_json_filename(filename: &str) -> bool {
    filename == JSON_FILENAME
}

pub fn file_identity(vendor: Option<&str>, filename: &str) -> String {
    match vendor {
        Some(vendor) => format!("{}::{}", vendor, filename),
        None => filename.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationKey {
    pub id: KeyId,
    pub file_id: FileId,
    pub key: String,
    #[serde(default)]
    pub is_html: bool,
    #[serde(default)]
    pub translations: Translations,
}

impl TranslationKey {
    pub fn new(id: KeyId, file_id: FileId, key: impl Into<String>) -> Self {
        Self {
            id,
            file_id,
            key: key.into(),
            is_html: false,
            translations: Translations::new(),
        }
    }

    /// The stored value for `locale`, empty strings included.
    pub fn get_translation(&self, locale: &str) -> Option<&str> {
        self.translations.get(locale).map(String::as_str)
    }

    /// True when `locale` holds a non-empty value.
    pub fn has_translation(&self, locale: &str) -> bool {
        self.get_translation(locale).is_some_and(|v| !v.is_empty())
    }

    pub fn set_translation(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        self.translations.insert(locale.into(), value.into());
    }

    pub fn remove_translation(&mut self, locale: &str) -> Option<String> {
        self.translations.shift_remove(locale)
    }

    pub fn with_translation(mut self, locale: &str, value: &str) -> Self {
        self.set_translation(locale, value);
        self
    }
}

/// A file together with all of its keys, in key creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWithKeys {
    #[serde(flatten)]
    pub file: TranslationFile,
    pub translation_keys: Vec<TranslationKey>,
}

impl FileWithKeys {
    pub fn key(&self, key: &str) -> Option<&TranslationKey> {
        self.translation_keys.iter().find(|k| k.key == key)
    }
}
