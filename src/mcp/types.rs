use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{
    importer::ImportReport,
    model::{FileWithKeys, TranslationKey, Translations},
};

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (where .transyncrc.json lives)
    pub project_root_path: String,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub locales: Option<Vec<String>>,
    pub import_path: String,
    pub export_path: String,
    pub database_path: String,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            locales: c.locales,
            import_path: c.import_path,
            export_path: c.export_path,
            database_path: c.database_path,
        }
    }
}

// ============================================================
// Import / Export Types
// ============================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportParams {
    pub project_root_path: String,
    /// Add values for locales that are missing or empty in existing files
    #[serde(default)]
    pub fill_missing: bool,
    /// Overwrite values that already exist
    #[serde(default)]
    pub replace_existing: bool,
    /// Import empty values too
    #[serde(default)]
    pub include_empty: bool,
    /// Delete all stored files and keys before importing
    #[serde(default)]
    pub purge: bool,
    /// Report the changes without saving them
    #[serde(default)]
    pub dry_run: bool,
    /// Only import these locales (overrides config)
    pub locales: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub dry_run: bool,
    #[serde(flatten)]
    pub report: ImportReport,
    pub files: Vec<FileWithKeys>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub project_root_path: String,
    /// Write keys without a value as empty strings
    #[serde(default)]
    pub include_empty: bool,
    /// Only export these locales (overrides config)
    pub locales: Option<Vec<String>>,
}

// ============================================================
// File Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    pub project_root_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesResult {
    pub files: Vec<FileWithKeys>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileParams {
    pub project_root_path: String,
    /// File name without extension, or "_json" for flat JSON translations
    pub filename: String,
    /// Vendor package, omit for application files
    pub vendor: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileParams {
    pub project_root_path: String,
    pub file_id: u64,
    pub filename: String,
    pub vendor: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    pub project_root_path: String,
    pub file_id: u64,
}

// ============================================================
// Key Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysParams {
    pub project_root_path: String,
    pub file_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysResult {
    pub keys: Vec<TranslationKey>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyParams {
    pub project_root_path: String,
    pub file_id: u64,
    /// Dotted key, e.g. "login.password"
    pub key: String,
    #[serde(default)]
    pub is_html: bool,
    /// Locale -> value
    #[serde(default)]
    pub translations: Translations,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeyParams {
    pub project_root_path: String,
    pub key_id: u64,
    pub key: Option<String>,
    pub is_html: Option<bool>,
    /// Replaces all translations of the key when given
    pub translations: Option<Translations>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKeyParams {
    pub project_root_path: String,
    pub key_id: u64,
}
