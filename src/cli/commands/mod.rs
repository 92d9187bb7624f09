pub mod export;
pub mod files;
pub mod import;
pub mod init;
pub mod keys;

use std::env;

use anyhow::{Context, Result};

use super::args::CommonArgs;
use crate::config::Workspace;
use crate::core::store::JsonStore;

/// Resolve the workspace for the current directory and open its store.
pub(crate) fn open_workspace(common: &CommonArgs) -> Result<(Workspace, JsonStore)> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let workspace = Workspace::load(&current_dir, &common.overrides())?;
    let store = JsonStore::open(&workspace.database_path)?;
    Ok((workspace, store))
}
