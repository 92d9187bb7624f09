use anyhow::Result;

use super::super::args::{FilesAction, FilesCommand};
use super::super::exit_status::ExitStatus;
use super::super::report::{print_file_action, print_files, print_json};
use super::open_workspace;
use crate::core::catalog::{Catalog, FileInput};

pub fn files(cmd: FilesCommand) -> Result<ExitStatus> {
    match cmd.action {
        FilesAction::List { common } => {
            let (_, mut store) = open_workspace(&common)?;
            let files = Catalog::new(&mut store).list_files()?;
            if common.json {
                print_json(&files)?;
            } else {
                print_files(&files);
            }
        }
        FilesAction::Add {
            filename,
            vendor,
            common,
        } => {
            let (_, mut store) = open_workspace(&common)?;
            let input = FileInput::new(vendor.as_deref(), &filename);
            let file = Catalog::new(&mut store).create_file(&input)?;
            store.flush()?;
            if common.json {
                print_json(&file)?;
            } else {
                print_file_action("Created", &file);
            }
        }
        FilesAction::Update {
            id,
            filename,
            vendor,
            common,
        } => {
            let (_, mut store) = open_workspace(&common)?;
            let input = FileInput::new(vendor.as_deref(), &filename);
            let file = Catalog::new(&mut store).update_file(id, &input)?;
            store.flush()?;
            if common.json {
                print_json(&file)?;
            } else {
                print_file_action("Updated", &file);
            }
        }
        FilesAction::Delete { id, common } => {
            let (_, mut store) = open_workspace(&common)?;
            let deleted = Catalog::new(&mut store).delete_file(id)?;
            store.flush()?;
            if common.json {
                print_json(&deleted)?;
            } else {
                print_file_action("Deleted", &deleted.file);
            }
        }
    }

    Ok(ExitStatus::Success)
}
