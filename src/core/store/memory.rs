use serde::{Deserialize, Serialize};

use crate::core::model::{FileId, FileWithKeys, KeyId, TranslationFile, TranslationKey};
use crate::error::{Error, Result};

use super::TranslationStore;

/// In-memory store. Ids are never reused, not even after a purge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    #[serde(default)]
    last_file_id: FileId,
    #[serde(default)]
    last_key_id: KeyId,
    #[serde(default)]
    files: Vec<FileWithKeys>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn file_index(&self, id: FileId) -> Result<usize> {
        self.files
            .iter()
            .position(|f| f.file.id == id)
            .ok_or_else(|| Error::not_found("translation file", id))
    }

    /// `(file index, key index)` of a key.
    fn key_position(&self, id: KeyId) -> Result<(usize, usize)> {
        self.files
            .iter()
            .enumerate()
            .find_map(|(fi, file)| {
                file.translation_keys
                    .iter()
                    .position(|k| k.id == id)
                    .map(|ki| (fi, ki))
            })
            .ok_or_else(|| Error::not_found("translation key", id))
    }

    fn ensure_unique_file(
        &self,
        vendor: Option<&str>,
        filename: &str,
        except: Option<FileId>,
    ) -> Result<()> {
        let taken = self.files.iter().any(|f| {
            Some(f.file.id) != except && f.file.vendor.as_deref() == vendor && f.file.filename == filename
        });
        if taken {
            return Err(Error::duplicate(
                "translation file",
                crate::core::model::file_identity(vendor, filename),
            ));
        }
        Ok(())
    }

    fn ensure_unique_key(&self, file_index: usize, key: &str, except: Option<KeyId>) -> Result<()> {
        let file = &self.files[file_index];
        if file
            .translation_keys
            .iter()
            .any(|k| Some(k.id) != except && k.key == key)
        {
            return Err(Error::duplicate(
                "translation key",
                format!("{} in {}", key, file.file.identity()),
            ));
        }
        Ok(())
    }
}

impl TranslationStore for MemoryStore {
    fn find_file(&self, vendor: Option<&str>, filename: &str) -> Result<Option<TranslationFile>> {
        Ok(self
            .files
            .iter()
            .find(|f| f.file.vendor.as_deref() == vendor && f.file.filename == filename)
            .map(|f| f.file.clone()))
    }

    fn get_file(&self, id: FileId) -> Result<TranslationFile> {
        let index = self.file_index(id)?;
        Ok(self.files[index].file.clone())
    }

    fn create_file(&mut self, vendor: Option<&str>, filename: &str) -> Result<TranslationFile> {
        self.ensure_unique_file(vendor, filename, None)?;

        self.last_file_id += 1;
        let file = TranslationFile {
            id: self.last_file_id,
            vendor: vendor.map(str::to_string),
            filename: filename.to_string(),
        };
        self.files.push(FileWithKeys {
            file: file.clone(),
            translation_keys: Vec::new(),
        });
        Ok(file)
    }

    fn update_file(&mut self, file: &TranslationFile) -> Result<()> {
        let index = self.file_index(file.id)?;
        self.ensure_unique_file(file.vendor.as_deref(), &file.filename, Some(file.id))?;
        self.files[index].file = file.clone();
        Ok(())
    }

    fn delete_file(&mut self, id: FileId) -> Result<FileWithKeys> {
        let index = self.file_index(id)?;
        Ok(self.files.remove(index))
    }

    fn list_files_with_keys(&self) -> Result<Vec<FileWithKeys>> {
        Ok(self.files.clone())
    }

    fn list_keys(&self, file_id: FileId) -> Result<Vec<TranslationKey>> {
        let index = self.file_index(file_id)?;
        Ok(self.files[index].translation_keys.clone())
    }

    fn find_key(&self, file_id: FileId, key: &str) -> Result<Option<TranslationKey>> {
        Ok(self
            .files
            .iter()
            .find(|f| f.file.id == file_id)
            .and_then(|f| f.key(key))
            .cloned())
    }

    fn get_key(&self, id: KeyId) -> Result<TranslationKey> {
        let (fi, ki) = self.key_position(id)?;
        Ok(self.files[fi].translation_keys[ki].clone())
    }

    fn create_key(&mut self, file_id: FileId, key: &str) -> Result<TranslationKey> {
        let index = self.file_index(file_id)?;
        self.ensure_unique_key(index, key, None)?;

        self.last_key_id += 1;
        let created = TranslationKey::new(self.last_key_id, file_id, key);
        self.files[index].translation_keys.push(created.clone());
        Ok(created)
    }

    fn save_key(&mut self, key: &TranslationKey) -> Result<()> {
        let (fi, ki) = self.key_position(key.id)?;

        if self.files[fi].file.id != key.file_id {
            // Moving a key to another file.
            let target = self.file_index(key.file_id)?;
            self.ensure_unique_key(target, &key.key, Some(key.id))?;
            self.files[fi].translation_keys.remove(ki);
            self.files[target].translation_keys.push(key.clone());
            return Ok(());
        }

        self.ensure_unique_key(fi, &key.key, Some(key.id))?;
        self.files[fi].translation_keys[ki] = key.clone();
        Ok(())
    }

    fn delete_key(&mut self, id: KeyId) -> Result<TranslationKey> {
        let (fi, ki) = self.key_position(id)?;
        Ok(self.files[fi].translation_keys.remove(ki))
    }

    fn purge_all(&mut self) -> Result<()> {
        self.files.clear();
        Ok(())
    }
}
