use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    config::{ConfigOverrides, load_config},
    core::{
        catalog::{Catalog, FileInput, KeyUpdate, NewKey},
        exporter::{ExportOptions, export},
        importer::{ImportPolicy, import_directory},
        store::TranslationStore,
    },
};

use super::helpers::{json_result, open_workspace, to_mcp_error};
use super::types::{
    ConfigDto, ConfigValues, CreateFileParams, CreateKeyParams, DeleteFileParams, DeleteKeyParams,
    ExportParams, FilesResult, GetConfigParams, ImportParams, ImportResult, KeysResult,
    ListFilesParams, ListKeysParams, UpdateFileParams, UpdateKeyParams,
};

#[derive(Clone)]
pub struct TransyncMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for TransyncMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TransyncMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current transync configuration
    #[tool(description = "Get the current transync configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Import locale files into the translation store
    #[tool(
        description = "Import PHP and JSON locale files from the import path into the translation store. Existing files are skipped unless fillMissing or replaceExisting is set. Use dryRun to preview."
    )]
    pub async fn import_translations(
        &self,
        params: Parameters<ImportParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let overrides = ConfigOverrides {
            locales: params.locales.clone(),
            ..Default::default()
        };
        let (workspace, mut store) = open_workspace(&params.project_root_path, &overrides)?;

        let policy = ImportPolicy {
            replace_existing: params.replace_existing,
            fill_missing: params.fill_missing,
            include_empty: params.include_empty,
            only_locales: workspace.locales.clone(),
            purge_database: params.purge,
        };

        let report = import_directory(&mut store, &workspace.import_path, &policy)
            .map_err(|e| to_mcp_error("Import failed", e))?;
        if !params.dry_run {
            store
                .flush()
                .map_err(|e| to_mcp_error("Failed to save store", e))?;
        }

        let files = store
            .list_files_with_keys()
            .map_err(|e| to_mcp_error("Failed to list files", e))?;

        json_result(&ImportResult {
            dry_run: params.dry_run,
            report,
            files,
        })
    }

    /// Export the translation store to locale files
    #[tool(
        description = "Export every stored translation to PHP and JSON locale files in the export path. The export directory is replaced."
    )]
    pub async fn export_translations(
        &self,
        params: Parameters<ExportParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let overrides = ConfigOverrides {
            locales: params.locales.clone(),
            ..Default::default()
        };
        let (workspace, store) = open_workspace(&params.project_root_path, &overrides)?;

        let files = store
            .list_files_with_keys()
            .map_err(|e| to_mcp_error("Failed to read store", e))?;
        let options = ExportOptions {
            include_empty: params.include_empty,
            only_locales: workspace.locales.clone(),
        };
        let report = export(&files, &workspace.export_path, options)
            .map_err(|e| to_mcp_error("Export failed", e))?;

        json_result(&report)
    }

    /// List translation files with their keys
    #[tool(description = "List all translation files with their keys and translations.")]
    pub async fn list_files(
        &self,
        params: Parameters<ListFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        let (_, mut store) =
            open_workspace(&params.0.project_root_path, &ConfigOverrides::default())?;

        let files = Catalog::new(&mut store)
            .list_files()
            .map_err(|e| to_mcp_error("Failed to list files", e))?;

        json_result(&FilesResult { files })
    }

    #[tool(description = "Create a translation file. Use filename \"_json\" for flat JSON translations.")]
    pub async fn create_file(
        &self,
        params: Parameters<CreateFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let input = FileInput::new(params.vendor.as_deref(), &params.filename);
        let file = Catalog::new(&mut store)
            .create_file(&input)
            .map_err(|e| to_mcp_error("Failed to create file", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&file)
    }

    #[tool(description = "Rename a translation file or move it to another vendor.")]
    pub async fn update_file(
        &self,
        params: Parameters<UpdateFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let input = FileInput::new(params.vendor.as_deref(), &params.filename);
        let file = Catalog::new(&mut store)
            .update_file(params.file_id, &input)
            .map_err(|e| to_mcp_error("Failed to update file", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&file)
    }

    #[tool(description = "Delete a translation file and all of its keys.")]
    pub async fn delete_file(
        &self,
        params: Parameters<DeleteFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let deleted = Catalog::new(&mut store)
            .delete_file(params.file_id)
            .map_err(|e| to_mcp_error("Failed to delete file", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&deleted)
    }

    #[tool(description = "List the keys of a translation file.")]
    pub async fn list_keys(
        &self,
        params: Parameters<ListKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let keys = Catalog::new(&mut store)
            .list_keys(params.file_id)
            .map_err(|e| to_mcp_error("Failed to list keys", e))?;

        json_result(&KeysResult { keys })
    }

    #[tool(
        description = "Create a translation key in a file. Keys are dotted paths (e.g. 'login.password') and must not overlap an existing key's namespace."
    )]
    pub async fn create_key(
        &self,
        params: Parameters<CreateKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let input = NewKey {
            key: params.key,
            is_html: params.is_html,
            translations: params.translations,
        };
        let key = Catalog::new(&mut store)
            .create_key(params.file_id, &input)
            .map_err(|e| to_mcp_error("Failed to create key", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&key)
    }

    #[tool(
        description = "Update a translation key. Omitted fields are kept; translations, when given, replace all values of the key."
    )]
    pub async fn update_key(
        &self,
        params: Parameters<UpdateKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let update = KeyUpdate {
            key: params.key,
            is_html: params.is_html,
            translations: params.translations,
        };
        let key = Catalog::new(&mut store)
            .update_key(params.key_id, &update)
            .map_err(|e| to_mcp_error("Failed to update key", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&key)
    }

    #[tool(description = "Delete a translation key.")]
    pub async fn delete_key(
        &self,
        params: Parameters<DeleteKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (_, mut store) = open_workspace(&params.project_root_path, &ConfigOverrides::default())?;

        let deleted = Catalog::new(&mut store)
            .delete_key(params.key_id)
            .map_err(|e| to_mcp_error("Failed to delete key", e))?;
        store
            .flush()
            .map_err(|e| to_mcp_error("Failed to save store", e))?;

        json_result(&deleted)
    }
}

#[tool_handler]
impl ServerHandler for TransyncMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Transync MCP keeps PHP-array and JSON locale files in sync with a translation store.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. import_translations - Load locale files into the store\n\
                 3. export_translations - Write the store back to locale files\n\
                 4. list_files / create_file / update_file / delete_file - Manage translation files\n\
                 5. list_keys / create_key / update_key / delete_key - Manage translation keys\n\n\
                 Recommended Workflow:\n\
                 1. Run import_translations with dryRun to preview, then without it\n\
                 2. Edit keys with the file and key tools\n\
                 3. Run export_translations to write the result"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = TransyncMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
