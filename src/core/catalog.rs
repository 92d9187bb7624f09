//! Validated create/update/delete of translation files and keys.
//!
//! Every operation validates its input against the current store contents
//! before writing anything. Rule violations come back as
//! [`Error::Validation`] with one message per offending field.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    keys::{has_edge_separator, keys_collide},
    model::{FileId, FileWithKeys, KeyId, TranslationFile, TranslationKey, Translations, is_json_filename},
    store::TranslationStore,
};
use crate::error::{Result, ValidationErrors};

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

pub const VENDOR_JSON_MESSAGE: &str = "JSON files in vendor directories are not supported.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInput {
    #[serde(default)]
    pub vendor: Option<String>,
    pub filename: String,
}

impl FileInput {
    pub fn new(vendor: Option<&str>, filename: &str) -> Self {
        Self {
            vendor: vendor.map(str::to_string),
            filename: filename.to_string(),
        }
    }

    /// An empty vendor means "no vendor".
    fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKey {
    pub key: String,
    #[serde(default)]
    pub is_html: bool,
    #[serde(default)]
    pub translations: Translations,
}

/// Fields to change on a key. `None` leaves the field as it is; `translations`
/// replaces the whole map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUpdate {
    pub key: Option<String>,
    pub is_html: Option<bool>,
    pub translations: Option<Translations>,
}

pub struct Catalog<'s, S: TranslationStore + ?Sized> {
    store: &'s mut S,
}

impl<'s, S: TranslationStore + ?Sized> Catalog<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    pub fn list_files(&self) -> Result<Vec<FileWithKeys>> {
        self.store.list_files_with_keys()
    }

    pub fn create_file(&mut self, input: &FileInput) -> Result<TranslationFile> {
        self.validate_file(input, None)?;

        let file = self.store.create_file(input.vendor(), &input.filename)?;
        info!(id = file.id, file = %file.identity(), "created translation file");
        Ok(file)
    }

    pub fn update_file(&mut self, id: FileId, input: &FileInput) -> Result<TranslationFile> {
        let mut file = self.store.get_file(id)?;
        self.validate_file(input, Some(id))?;

        file.vendor = input.vendor().map(str::to_string);
        file.filename = input.filename.clone();
        self.store.update_file(&file)?;
        info!(id, file = %file.identity(), "updated translation file");
        Ok(file)
    }

    pub fn delete_file(&mut self, id: FileId) -> Result<FileWithKeys> {
        let deleted = self.store.delete_file(id)?;
        info!(
            id,
            file = %deleted.file.identity(),
            keys = deleted.translation_keys.len(),
            "deleted translation file"
        );
        Ok(deleted)
    }

    pub fn list_keys(&self, file_id: FileId) -> Result<Vec<TranslationKey>> {
        self.store.list_keys(file_id)
    }

    pub fn create_key(&mut self, file_id: FileId, input: &NewKey) -> Result<TranslationKey> {
        let file = self.store.get_file(file_id)?;

        let mut errors = ValidationErrors::new();
        self.check_key(&file, &input.key, None, &mut errors)?;
        check_translations(&input.translations, &mut errors);
        errors.into_result()?;

        let mut key = self.store.create_key(file_id, &input.key)?;
        key.is_html = input.is_html;
        key.translations = input.translations.clone();
        self.store.save_key(&key)?;
        info!(id = key.id, file = %file.identity(), key = %key.key, "created translation key");
        Ok(key)
    }

    pub fn update_key(&mut self, id: KeyId, update: &KeyUpdate) -> Result<TranslationKey> {
        let mut key = self.store.get_key(id)?;
        let file = self.store.get_file(key.file_id)?;

        let mut errors = ValidationErrors::new();
        if let Some(new_key) = &update.key {
            self.check_key(&file, new_key, Some(id), &mut errors)?;
        }
        if let Some(translations) = &update.translations {
            check_translations(translations, &mut errors);
        }
        errors.into_result()?;

        if let Some(new_key) = &update.key {
            key.key = new_key.clone();
        }
        if let Some(is_html) = update.is_html {
            key.is_html = is_html;
        }
        if let Some(translations) = &update.translations {
            key.translations = translations.clone();
        }
        self.store.save_key(&key)?;
        info!(id, key = %key.key, "updated translation key");
        Ok(key)
    }

    pub fn delete_key(&mut self, id: KeyId) -> Result<TranslationKey> {
        let deleted = self.store.delete_key(id)?;
        info!(id, key = %deleted.key, "deleted translation key");
        Ok(deleted)
    }

    fn validate_file(&self, input: &FileInput, ignore: Option<FileId>) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if is_json_filename(&input.filename) && input.vendor().is_some() {
            errors.add("filename", VENDOR_JSON_MESSAGE);
            return errors.into_result();
        }

        if input.filename.is_empty() {
            errors.add("filename", "The filename field is required.");
        } else if !NAME_REGEX.is_match(&input.filename) {
            errors.add("filename", "The filename format is invalid.");
        } else if let Some(existing) = self.store.find_file(input.vendor(), &input.filename)?
            && Some(existing.id) != ignore
        {
            errors.add("filename", "The filename has already been taken.");
        }

        if let Some(vendor) = input.vendor()
            && !NAME_REGEX.is_match(vendor)
        {
            errors.add("vendor", "The vendor format is invalid.");
        }

        errors.into_result()
    }

    /// Key rules: required, no leading/trailing dot outside JSON files, and no
    /// namespace overlap with another key of the same file.
    fn check_key(
        &self,
        file: &TranslationFile,
        key: &str,
        ignore: Option<KeyId>,
        errors: &mut ValidationErrors,
    ) -> Result<()> {
        if key.is_empty() {
            errors.add("key", "The key field is required.");
            return Ok(());
        }

        let json = file.is_json();
        if !json && has_edge_separator(key) {
            errors.add("key", "The key format is invalid.");
            return Ok(());
        }

        let taken = self.store.list_keys(file.id)?.iter().any(|other| {
            Some(other.id) != ignore
                && if json {
                    other.key == key
                } else {
                    keys_collide(&other.key, key)
                }
        });
        if taken {
            errors.add("key", "The key has already been taken.");
        }
        Ok(())
    }
}

fn check_translations(translations: &Translations, errors: &mut ValidationErrors) {
    if translations.keys().any(|locale| locale.trim().is_empty()) {
        errors.add("translations", "The translations locales must not be empty.");
    }
}
