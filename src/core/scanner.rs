//! Discovery of translation sources in a language directory tree.
//!
//! A language root is a *library*; every immediate subdirectory of
//! `<root>/vendor/` is another library belonging to that vendor. Libraries hold
//! one directory per locale with PHP files inside. The root library may also
//! hold `<locale>.json` files.
//!
//! ```text
//! lang/
//! ├── en.json
//! ├── en/auth.php
//! ├── nl/auth.php
//! └── vendor/package/en/messages.php
//! ```
//!
//! Every listing is a single directory level, sorted by file name.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};

pub const VENDOR_DIR: &str = "vendor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Php,
    Json,
}

impl SourceFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Php => "php",
            SourceFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub path: PathBuf,
    pub vendor: Option<String>,
}

impl Library {
    pub fn is_root(&self) -> bool {
        self.vendor.is_none()
    }
}

/// One translation source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub vendor: Option<String>,
    pub locale: String,
    /// Basename without extension; `_json` is never produced here.
    pub filename: String,
    pub format: SourceFormat,
    pub path: PathBuf,
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::PathNotFound(path.to_path_buf()))
    }
}

/// The root library followed by each vendor library.
pub fn list_libraries(root: &Path) -> Result<Vec<Library>> {
    ensure_directory(root)?;

    let mut libraries = vec![Library {
        path: root.to_path_buf(),
        vendor: None,
    }];

    let vendor_path = root.join(VENDOR_DIR);
    if vendor_path.is_dir() {
        for path in list_children(&vendor_path, EntryKind::Dir)? {
            let vendor = vendor_from_path(&path);
            libraries.push(Library { path, vendor });
        }
    }

    Ok(libraries)
}

/// Locale directories of a library (every subdirectory except `vendor`).
pub fn list_locale_dirs(library: &Library) -> Result<Vec<PathBuf>> {
    Ok(list_children(&library.path, EntryKind::Dir)?
        .into_iter()
        .filter(|path| path.file_name().and_then(|n| n.to_str()) != Some(VENDOR_DIR))
        .collect())
}

/// Files with the extension of `format` directly inside `dir`.
pub fn list_translation_files(dir: &Path, format: SourceFormat) -> Result<Vec<PathBuf>> {
    Ok(list_children(dir, EntryKind::File)?
        .into_iter()
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(format.extension()))
        .collect())
}

/// JSON sources of a library. Vendor libraries never contribute JSON files.
pub fn list_json_sources(library: &Library) -> Result<Vec<SourceFile>> {
    if !library.is_root() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for path in list_translation_files(&library.path, SourceFormat::Json)? {
        let Some(locale) = file_stem(&path) else {
            continue;
        };
        sources.push(SourceFile {
            vendor: None,
            locale,
            filename: crate::core::model::JSON_FILENAME.to_string(),
            format: SourceFormat::Json,
            path,
        });
    }
    Ok(sources)
}

/// PHP sources inside one locale directory of a library.
pub fn list_php_sources(library: &Library, locale_dir: &Path) -> Result<Vec<SourceFile>> {
    let Some(locale) = file_name(locale_dir) else {
        return Ok(Vec::new());
    };

    let mut sources = Vec::new();
    for path in list_translation_files(locale_dir, SourceFormat::Php)? {
        let Some(filename) = file_stem(&path) else {
            continue;
        };
        sources.push(SourceFile {
            vendor: library.vendor.clone(),
            locale: locale.clone(),
            filename,
            format: SourceFormat::Php,
            path,
        });
    }
    Ok(sources)
}

/// Every translation source under `root`, in load order.
pub fn scan(root: &Path) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for library in list_libraries(root)? {
        sources.extend(list_json_sources(&library)?);
        for locale_dir in list_locale_dirs(&library)? {
            sources.extend(list_php_sources(&library, &locale_dir)?);
        }
    }
    Ok(sources)
}

/// `Some(name)` when the library sits directly inside a `vendor` directory.
pub fn vendor_from_path(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    if file_name(parent).as_deref() == Some(VENDOR_DIR) {
        file_name(path)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

fn list_children(path: &Path, kind: EntryKind) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::io("read directory", path, io::Error::from(e)))?;
        let matches = match kind {
            EntryKind::Dir => entry.file_type().is_dir(),
            EntryKind::File => entry.file_type().is_file(),
        };
        if matches {
            children.push(entry.into_path());
        }
    }

    Ok(children)
}

fn file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => Some(name.to_string()),
        None => {
            warn!(path = %path.display(), "skipping path with a non UTF-8 name");
            None
        }
    }
}

fn file_stem(path: &Path) -> Option<String> {
    let stem = path.file_stem()?;
    match stem.to_str() {
        Some(stem) => Some(stem.to_string()),
        None => {
            warn!(path = %path.display(), "skipping file with a non UTF-8 name");
            None
        }
    }
}
