use anyhow::Result;

use super::super::args::ExportCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_export, print_json};
use super::open_workspace;
use crate::core::{
    exporter::{ExportOptions, export as export_files},
    store::TranslationStore,
};

pub fn export(cmd: ExportCommand) -> Result<ExitStatus> {
    let (workspace, store) = open_workspace(&cmd.common)?;

    let options = ExportOptions {
        include_empty: cmd.include_empty,
        only_locales: workspace.locales.clone(),
    };
    let files = store.list_files_with_keys()?;
    let report = export_files(&files, &workspace.export_path, options)?;

    if cmd.common.json {
        print_json(&report)?;
    } else {
        print_export(&report);
    }

    Ok(ExitStatus::Success)
}
