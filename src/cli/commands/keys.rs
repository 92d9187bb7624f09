use anyhow::Result;

use super::super::args::{KeysAction, KeysCommand};
use super::super::exit_status::ExitStatus;
use super::super::report::{print_json, print_key_action, print_keys};
use super::open_workspace;
use crate::core::{
    catalog::{Catalog, KeyUpdate, NewKey},
    model::Translations,
    store::TranslationStore,
};

pub fn keys(cmd: KeysCommand) -> Result<ExitStatus> {
    match cmd.action {
        KeysAction::List { file_id, common } => {
            let (_, mut store) = open_workspace(&common)?;
            let keys = Catalog::new(&mut store).list_keys(file_id)?;
            if common.json {
                print_json(&keys)?;
            } else {
                print_keys(&keys);
            }
        }
        KeysAction::Add {
            file_id,
            key,
            html,
            translations,
            common,
        } => {
            let (_, mut store) = open_workspace(&common)?;
            let input = NewKey {
                key,
                is_html: html,
                translations: translations.into_iter().collect(),
            };
            let key = Catalog::new(&mut store).create_key(file_id, &input)?;
            store.flush()?;
            if common.json {
                print_json(&key)?;
            } else {
                print_key_action("Created", &key);
            }
        }
        KeysAction::Update {
            key_id,
            key,
            html,
            no_html,
            translations,
            remove_locale,
            common,
        } => {
            let (_, mut store) = open_workspace(&common)?;

            // -t and --remove-locale edit the stored map; the catalog replaces it whole.
            let translations = if translations.is_empty() && remove_locale.is_empty() {
                None
            } else {
                let mut merged: Translations = store.get_key(key_id)?.translations;
                merged.extend(translations);
                for locale in &remove_locale {
                    merged.shift_remove(locale);
                }
                Some(merged)
            };

            let update = KeyUpdate {
                key,
                is_html: match (html, no_html) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                translations,
            };
            let key = Catalog::new(&mut store).update_key(key_id, &update)?;
            store.flush()?;
            if common.json {
                print_json(&key)?;
            } else {
                print_key_action("Updated", &key);
            }
        }
        KeysAction::Delete { key_id, common } => {
            let (_, mut store) = open_workspace(&common)?;
            let deleted = Catalog::new(&mut store).delete_key(key_id)?;
            store.flush()?;
            if common.json {
                print_json(&deleted)?;
            } else {
                print_key_action("Deleted", &deleted);
            }
        }
    }

    Ok(ExitStatus::Success)
}
