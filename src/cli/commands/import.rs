use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::super::args::ImportCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_import, print_json};
use super::open_workspace;
use crate::core::{
    importer::{ImportPolicy, ImportReport, import_directory},
    model::FileWithKeys,
    store::TranslationStore,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportOutput<'a> {
    dry_run: bool,
    #[serde(flatten)]
    report: &'a ImportReport,
    /// Every stored file with its keys after the import.
    files: Vec<FileWithKeys>,
}

pub fn import(cmd: ImportCommand) -> Result<ExitStatus> {
    let (workspace, mut store) = open_workspace(&cmd.common)?;

    let policy = ImportPolicy {
        replace_existing: cmd.replace_existing,
        fill_missing: cmd.fill_missing,
        include_empty: cmd.include_empty,
        only_locales: workspace.locales.clone(),
        purge_database: cmd.purge,
    };
    debug!(root = %workspace.import_path.display(), ?policy, "importing");

    let report = import_directory(&mut store, &workspace.import_path, &policy)?;

    if cmd.dry_run {
        debug!("dry run, store left untouched");
    } else {
        store.flush()?;
    }

    if cmd.common.json {
        print_json(&ImportOutput {
            dry_run: cmd.dry_run,
            report: &report,
            files: store.list_files_with_keys()?,
        })?;
    } else {
        print_import(&report, cmd.dry_run);
    }

    Ok(ExitStatus::Success)
}
