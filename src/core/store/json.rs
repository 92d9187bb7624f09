use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::model::{FileId, FileWithKeys, KeyId, TranslationFile, TranslationKey};
use crate::error::{Error, Result};

use super::{MemoryStore, TranslationStore};

/// On-disk layout of a [`JsonStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    /// Incremented on every flush.
    #[serde(default)]
    pub revision: u64,
    #[serde(flatten)]
    pub store: MemoryStore,
}

#[derive(Deserialize)]
struct RevisionOnly {
    #[serde(default)]
    revision: u64,
}

/// A [`MemoryStore`] persisted as one pretty-printed JSON document.
///
/// Changes stay in memory until [`JsonStore::flush`]. Dropping the store
/// without flushing discards them, which is how dry runs work.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    revision: u64,
    store: MemoryStore,
    dirty: bool,
}

impl JsonStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let document = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| Error::io("read", &path, e))?;
            serde_json::from_str::<StoreDocument>(&content).map_err(|source| Error::Serialize {
                what: "translation store",
                source,
            })?
        } else {
            StoreDocument::default()
        };

        debug!(path = %path.display(), revision = document.revision, "opened store");
        Ok(Self {
            path,
            revision: document.revision,
            store: document.store,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when there are changes that have not been flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes.
    ///
    /// Fails without writing when another process flushed the same file since
    /// it was opened.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let on_disk = self.read_disk_revision()?;
        if on_disk != self.revision {
            return Err(Error::duplicate(
                "store revision",
                format!("{} of {}", on_disk, self.path.display()),
            ));
        }

        let document = StoreDocument {
            revision: self.revision + 1,
            store: self.store.clone(),
        };
        let mut json = serde_json::to_string_pretty(&document).map_err(|source| Error::Serialize {
            what: "translation store",
            source,
        })?;
        json.push('\n');

        self.write_atomic(&json)?;
        self.revision = document.revision;
        self.dirty = false;

        info!(path = %self.path.display(), revision = self.revision, "saved store");
        Ok(())
    }

    fn read_disk_revision(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Error::io("read", &self.path, e))?;
        let header: RevisionOnly = serde_json::from_str(&content).map_err(|source| Error::Serialize {
            what: "translation store",
            source,
        })?;
        Ok(header.revision)
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| Error::io("create directory", &dir, e))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| Error::io("create temp file in", &dir, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| Error::io("write", temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| Error::io("write", &self.path, e.error))?;
        Ok(())
    }

    fn touch(&mut self) -> &mut MemoryStore {
        self.dirty = true;
        &mut self.store
    }
}

impl TranslationStore for JsonStore {
    fn find_file(&self, vendor: Option<&str>, filename: &str) -> Result<Option<TranslationFile>> {
        self.store.find_file(vendor, filename)
    }

    fn get_file(&self, id: FileId) -> Result<TranslationFile> {
        self.store.get_file(id)
    }

    fn create_file(&mut self, vendor: Option<&str>, filename: &str) -> Result<TranslationFile> {
        self.touch().create_file(vendor, filename)
    }

    fn update_file(&mut self, file: &TranslationFile) -> Result<()> {
        self.touch().update_file(file)
    }

    fn delete_file(&mut self, id: FileId) -> Result<FileWithKeys> {
        self.touch().delete_file(id)
    }

    fn list_files_with_keys(&self) -> Result<Vec<FileWithKeys>> {
        self.store.list_files_with_keys()
    }

    fn list_keys(&self, file_id: FileId) -> Result<Vec<TranslationKey>> {
        self.store.list_keys(file_id)
    }

    fn find_key(&self, file_id: FileId, key: &str) -> Result<Option<TranslationKey>> {
        self.store.find_key(file_id, key)
    }

    fn get_key(&self, id: KeyId) -> Result<TranslationKey> {
        self.store.get_key(id)
    }

    fn create_key(&mut self, file_id: FileId, key: &str) -> Result<TranslationKey> {
        self.touch().create_key(file_id, key)
    }

    fn save_key(&mut self, key: &TranslationKey) -> Result<()> {
        self.touch().save_key(key)
    }

    fn delete_key(&mut self, id: KeyId) -> Result<TranslationKey> {
        self.touch().delete_key(id)
    }

    fn purge_all(&mut self) -> Result<()> {
        self.touch().purge_all()
    }
}
