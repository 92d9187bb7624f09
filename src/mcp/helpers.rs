//! Helper functions for MCP server operations.

use std::path::Path;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::config::{ConfigOverrides, Workspace};
use crate::core::store::JsonStore;
use crate::error::Error;

/// Resolve the workspace of `project_root` and open its store.
pub fn open_workspace(
    project_root: &str,
    overrides: &ConfigOverrides,
) -> Result<(Workspace, JsonStore), McpError> {
    let workspace = Workspace::load(Path::new(project_root), overrides)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;
    let store = JsonStore::open(&workspace.database_path)
        .map_err(|e| to_mcp_error("Failed to open store", e))?;
    Ok((workspace, store))
}

/// Map an engine error to an MCP error.
///
/// Rejected input (validation, unknown id, conflict) becomes `invalid_params`
/// carrying the per-field messages; everything else is an internal error.
pub fn to_mcp_error(context: &str, err: Error) -> McpError {
    match &err {
        Error::Validation(errors) => {
            McpError::invalid_params(err.to_string(), serde_json::to_value(errors).ok())
        }
        Error::NotFound { .. } | Error::UniquenessViolation { .. } => {
            McpError::invalid_params(err.to_string(), None)
        }
        _ => McpError::internal_error(format!("{}: {}", context, err), None),
    }
}

/// Serialize `value` as the text content of a successful tool result.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}
