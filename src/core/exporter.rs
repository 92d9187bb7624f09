//! Writing the store back to a language directory.
//!
//! All output is rendered in memory first. Only then is the destination wiped
//! and rewritten, so a serialization failure never leaves it half cleared.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::core::{
    keys::insert_nested,
    model::{FileWithKeys, TranslationFile, TranslationKey},
    scanner::{SourceFormat, VENDOR_DIR},
    writers::{render_json, render_php},
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write keys without a value as empty strings.
    pub include_empty: bool,
    /// Only export these locales.
    pub only_locales: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    /// Path relative to the destination, with `/` separators.
    pub path: String,
    pub file: String,
    pub locale: String,
    pub keys: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub destination: PathBuf,
    pub files: Vec<ExportedFile>,
}

impl ExportReport {
    pub fn key_count(&self) -> usize {
        self.files.iter().map(|f| f.keys).sum()
    }
}

/// Contents of one output file.
#[derive(Debug)]
enum Bucket {
    Php(Map<String, Value>),
    Json(IndexMap<String, String>),
}

#[derive(Debug)]
struct PendingFile {
    file: String,
    locale: String,
    keys: usize,
    bucket: Bucket,
}

pub struct FileExporter {
    destination: PathBuf,
    options: ExportOptions,
}

impl FileExporter {
    pub fn new(destination: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            destination: destination.into(),
            options,
        }
    }

    pub fn export(&self, files: &[FileWithKeys]) -> Result<ExportReport> {
        let pending = self.collect(files);

        let rendered: Vec<(String, ExportedFile, String)> = pending
            .into_iter()
            .map(|(path, pending)| -> Result<(String, ExportedFile, String)> {
                let content = match &pending.bucket {
                    Bucket::Php(map) => render_php(map),
                    Bucket::Json(entries) => render_json(entries)?,
                };
                let exported = ExportedFile {
                    path: path.clone(),
                    file: pending.file,
                    locale: pending.locale,
                    keys: pending.keys,
                };
                Ok((path, exported, content))
            })
            .collect::<Result<_>>()?;

        self.clean_destination()?;

        let mut report = ExportReport {
            destination: self.destination.clone(),
            files: Vec::with_capacity(rendered.len()),
        };
        for (relative, exported, content) in rendered {
            let path = self.destination.join(&relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
            }
            fs::write(&path, content).map_err(|e| Error::io("write", &path, e))?;
            debug!(path = %path.display(), keys = exported.keys, "wrote locale file");
            report.files.push(exported);
        }

        info!(
            destination = %self.destination.display(),
            files = report.files.len(),
            "export finished"
        );
        Ok(report)
    }

    /// Group every exported value by output path.
    fn collect(&self, files: &[FileWithKeys]) -> IndexMap<String, PendingFile> {
        let all_locales = self.all_locales(files);
        let mut pending: IndexMap<String, PendingFile> = IndexMap::new();

        for entry in files {
            let file = &entry.file;
            if file.is_json() && file.vendor.is_some() {
                warn!(file = %file.identity(), "exporting vendor JSON file to the root directory");
            }

            for key in &entry.translation_keys {
                for locale in self.locales_for(key, all_locales.as_ref()) {
                    let value = key.get_translation(&locale).unwrap_or_default();
                    if value.is_empty() && !self.options.include_empty {
                        continue;
                    }

                    let path = output_path(file, &locale);
                    let target = pending.entry(path).or_insert_with(|| PendingFile {
                        file: file.identity(),
                        locale: locale.clone(),
                        keys: 0,
                        bucket: if file.is_json() {
                            Bucket::Json(IndexMap::new())
                        } else {
                            Bucket::Php(Map::new())
                        },
                    });

                    target.keys += 1;
                    match &mut target.bucket {
                        Bucket::Json(entries) => {
                            entries.insert(key.key.clone(), value.to_string());
                        }
                        Bucket::Php(map) => {
                            insert_nested(map, &key.key, Value::String(value.to_string()));
                        }
                    }
                }
            }
        }

        pending
    }

    /// Locales shared by every key, or `None` when each key uses its own.
    fn all_locales(&self, files: &[FileWithKeys]) -> Option<Vec<String>> {
        if let Some(locales) = &self.options.only_locales
            && !locales.is_empty()
        {
            return Some(locales.clone());
        }
        if !self.options.include_empty {
            return None;
        }

        let mut locales = IndexSet::new();
        for key in files.iter().flat_map(|f| &f.translation_keys) {
            locales.extend(key.translations.keys().cloned());
        }
        Some(locales.into_iter().collect())
    }

    fn locales_for(&self, key: &TranslationKey, all_locales: Option<&Vec<String>>) -> Vec<String> {
        match all_locales {
            Some(locales) => locales.clone(),
            None => key.translations.keys().cloned().collect(),
        }
    }

    fn clean_destination(&self) -> Result<()> {
        if self.destination.exists() {
            fs::remove_dir_all(&self.destination)
                .map_err(|e| Error::io("clean directory", &self.destination, e))?;
        }
        fs::create_dir_all(&self.destination)
            .map_err(|e| Error::io("create directory", &self.destination, e))
    }
}

/// Export `files` into `destination`, replacing its contents.
pub fn export(files: &[FileWithKeys], destination: &Path, options: ExportOptions) -> Result<ExportReport> {
    FileExporter::new(destination, options).export(files)
}

/// Relative output path of one file/locale pair.
///
/// JSON files always live at the root; PHP files of vendors go below
/// `vendor/<vendor>/`.
pub fn output_path(file: &TranslationFile, locale: &str) -> String {
    if file.is_json() {
        return format!("{}.{}", locale, SourceFormat::Json.extension());
    }

    let relative = format!("{}/{}.{}", locale, file.filename, SourceFormat::Php.extension());
    match &file.vendor {
        Some(vendor) => format!("{}/{}/{}", VENDOR_DIR, vendor, relative),
        None => relative,
    }
}
