//! Reconciliation of loaded translation files with the store.
//!
//! Rows created during an import always take the incoming values. Rows that
//! already existed are only touched when the policy allows it:
//!
//! | existing value | `fill_missing` | `replace_existing` |
//! |----------------|----------------|--------------------|
//! | missing or ""  | written        | kept               |
//! | non-empty      | kept           | written            |
//!
//! A file that already existed is skipped entirely unless one of the two
//! flags is set. A new key of a PHP file that collides with the namespace of
//! another key in that file is skipped and listed in the report.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{
    loader::{self, LoadOptions, LoadedTranslationFile},
    keys::keys_collide,
    model::{TranslationFile, TranslationKey, Translations},
    store::TranslationStore,
};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPolicy {
    pub replace_existing: bool,
    pub fill_missing: bool,
    pub include_empty: bool,
    pub only_locales: Option<Vec<String>>,
    /// Delete every stored file and key before importing.
    pub purge_database: bool,
}

impl ImportPolicy {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_empty: self.include_empty,
            only_locales: self.only_locales.clone(),
        }
    }

    fn allows_locale(&self, locale: &str) -> bool {
        match &self.only_locales {
            Some(locales) => locales.iter().any(|l| l == locale),
            None => true,
        }
    }

    /// Whether `value` may be written for `locale` of a key.
    ///
    /// `existing` is `None` for keys created in this import.
    fn accepts(&self, locale: &str, value: &str, existing: Option<&TranslationKey>) -> bool {
        if !self.allows_locale(locale) {
            return false;
        }
        if value.is_empty() && !self.include_empty {
            return false;
        }
        match existing {
            None => true,
            Some(key) if key.has_translation(locale) => self.replace_existing,
            Some(_) => self.fill_missing,
        }
    }
}

/// One change made to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ImportWrite {
    Purged,
    FileCreated { file: String },
    KeyCreated {
        file: String,
        key: String,
        locales: Vec<String>,
    },
    KeyUpdated {
        file: String,
        key: String,
        locales: Vec<String>,
    },
}

/// An incoming key that was not created because it shares a namespace with
/// a stored key of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedKey {
    pub file: String,
    pub key: String,
    pub conflicts_with: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub writes: Vec<ImportWrite>,
    /// Files that already existed and were left alone.
    pub skipped_files: Vec<String>,
    pub skipped_keys: Vec<SkippedKey>,
    pub files_created: usize,
    pub keys_created: usize,
    pub keys_updated: usize,
    pub translations_written: usize,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    fn record(&mut self, write: ImportWrite) {
        match &write {
            ImportWrite::Purged => {}
            ImportWrite::FileCreated { .. } => self.files_created += 1,
            ImportWrite::KeyCreated { locales, .. } => {
                self.keys_created += 1;
                self.translations_written += locales.len();
            }
            ImportWrite::KeyUpdated { locales, .. } => {
                self.keys_updated += 1;
                self.translations_written += locales.len();
            }
        }
        self.writes.push(write);
    }
}

/// Merge `files` into `store` according to `policy`.
pub fn import<S>(
    store: &mut S,
    files: &[LoadedTranslationFile],
    policy: &ImportPolicy,
) -> Result<ImportReport>
where
    S: TranslationStore + ?Sized,
{
    let mut report = ImportReport::default();

    if policy.purge_database {
        info!("purging all translation files and keys");
        store.purge_all()?;
        report.record(ImportWrite::Purged);
    }

    for file in files {
        import_file(store, file, policy, &mut report)?;
    }

    info!(
        files_created = report.files_created,
        keys_created = report.keys_created,
        keys_updated = report.keys_updated,
        skipped = report.skipped_files.len(),
        skipped_keys = report.skipped_keys.len(),
        "import finished"
    );
    Ok(report)
}

/// Load every file below `root` and import it.
///
/// The directory is read completely before anything is written, so a missing
/// root or a parse error leaves the store untouched.
pub fn import_directory<S>(store: &mut S, root: &Path, policy: &ImportPolicy) -> Result<ImportReport>
where
    S: TranslationStore + ?Sized,
{
    let files = loader::load(root, policy.load_options())?;
    import(store, &files, policy)
}

fn import_file<S>(
    store: &mut S,
    loaded: &LoadedTranslationFile,
    policy: &ImportPolicy,
    report: &mut ImportReport,
) -> Result<()>
where
    S: TranslationStore + ?Sized,
{
    let identity = loaded.identity();

    let file = match store.find_file(loaded.vendor.as_deref(), &loaded.filename)? {
        Some(_) if !policy.fill_missing && !policy.replace_existing => {
            debug!(file = %identity, "skipping existing file");
            report.skipped_files.push(identity);
            return Ok(());
        }
        Some(file) => file,
        None => {
            let file = store.create_file(loaded.vendor.as_deref(), &loaded.filename)?;
            report.record(ImportWrite::FileCreated {
                file: identity.clone(),
            });
            file
        }
    };

    for (key, translations) in &loaded.translations {
        import_key(store, &file, &identity, key, translations, policy, report)?;
    }

    Ok(())
}

fn import_key<S>(
    store: &mut S,
    file: &TranslationFile,
    identity: &str,
    key: &str,
    translations: &Translations,
    policy: &ImportPolicy,
    report: &mut ImportReport,
) -> Result<()>
where
    S: TranslationStore + ?Sized,
{
    let existing = store.find_key(file.id, key)?;
    let mut row = existing
        .clone()
        .unwrap_or_else(|| TranslationKey::new(0, file.id, key));

    let mut written = Vec::new();
    for (locale, value) in translations {
        if policy.accepts(locale, value, existing.as_ref()) {
            row.set_translation(locale.as_str(), value.as_str());
            written.push(locale.clone());
        }
    }

    if written.is_empty() {
        return Ok(());
    }

    if existing.is_none() && !file.is_json() {
        let conflict = store
            .list_keys(file.id)?
            .into_iter()
            .find(|other| keys_collide(&other.key, key));
        if let Some(other) = conflict {
            warn!(file = %identity, key = %key, conflicts_with = %other.key, "skipping colliding key");
            report.skipped_keys.push(SkippedKey {
                file: identity.to_string(),
                key: key.to_string(),
                conflicts_with: other.key,
            });
            return Ok(());
        }
    }

    let write = match existing {
        Some(_) => {
            store.save_key(&row)?;
            ImportWrite::KeyUpdated {
                file: identity.to_string(),
                key: key.to_string(),
                locales: written,
            }
        }
        None => {
            row.id = store.create_key(file.id, key)?.id;
            store.save_key(&row)?;
            ImportWrite::KeyCreated {
                file: identity.to_string(),
                key: key.to_string(),
                locales: written,
            }
        }
    };
    debug!(file = %identity, key = %key, "imported key");
    report.record(write);

    Ok(())
}
