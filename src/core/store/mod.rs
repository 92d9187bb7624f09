//! Persistence of translation files and keys.
//!
//! The import, export and catalog code only talk to [`TranslationStore`].
//! [`MemoryStore`] keeps everything in memory; [`JsonStore`] loads a
//! `MemoryStore` from a JSON document and writes it back on `flush`.

mod json;
mod memory;

pub use json::{JsonStore, StoreDocument};
pub use memory::MemoryStore;

use crate::core::model::{FileId, FileWithKeys, KeyId, TranslationFile, TranslationKey};
use crate::error::Result;

pub trait TranslationStore {
    fn find_file(&self, vendor: Option<&str>, filename: &str) -> Result<Option<TranslationFile>>;

    /// Fails with `NotFound` for an unknown id.
    fn get_file(&self, id: FileId) -> Result<TranslationFile>;

    /// Fails with `UniquenessViolation` when `(vendor, filename)` exists.
    fn create_file(&mut self, vendor: Option<&str>, filename: &str) -> Result<TranslationFile>;

    fn update_file(&mut self, file: &TranslationFile) -> Result<()>;

    /// Deletes the file and all of its keys, returning what was removed.
    fn delete_file(&mut self, id: FileId) -> Result<FileWithKeys>;

    /// Every file with its keys, in creation order.
    fn list_files_with_keys(&self) -> Result<Vec<FileWithKeys>>;

    fn list_keys(&self, file_id: FileId) -> Result<Vec<TranslationKey>>;

    fn find_key(&self, file_id: FileId, key: &str) -> Result<Option<TranslationKey>>;

    fn get_key(&self, id: KeyId) -> Result<TranslationKey>;

    /// Fails with `UniquenessViolation` when `(file_id, key)` exists.
    fn create_key(&mut self, file_id: FileId, key: &str) -> Result<TranslationKey>;

    /// Replace the stored row with the same id.
    fn save_key(&mut self, key: &TranslationKey) -> Result<()>;

    fn delete_key(&mut self, id: KeyId) -> Result<TranslationKey>;

    /// Remove every file and key.
    fn purge_all(&mut self) -> Result<()>;
}
