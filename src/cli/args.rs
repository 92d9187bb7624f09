//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `import`: Load locale files into the translation store
//! - `export`: Write the translation store back to locale files
//! - `files`: List, add, rename or delete translation files
//! - `keys`: List, add, update or delete translation keys
//! - `init`: Initialize a transync configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Only handle these locales, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub locales: Option<Vec<String>>,

    /// Directory to import locale files from (overrides config file)
    #[arg(long)]
    pub import_path: Option<PathBuf>,

    /// Directory to export locale files to (overrides config file)
    #[arg(long)]
    pub export_path: Option<PathBuf>,

    /// Translation store file (overrides config file)
    #[arg(long = "database")]
    pub database_path: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            locales: self.locales.clone(),
            import_path: self.import_path.clone(),
            export_path: self.export_path.clone(),
            database_path: self.database_path.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Add values for locales that are missing or empty in existing files
    #[arg(long)]
    pub fill_missing: bool,

    /// Overwrite values that already exist
    #[arg(long)]
    pub replace_existing: bool,

    /// Import empty values too
    #[arg(long)]
    pub include_empty: bool,

    /// Delete all stored files and keys before importing
    #[arg(long)]
    pub purge: bool,

    /// Show what would change without saving the store
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write keys without a value as empty strings
    #[arg(long)]
    pub include_empty: bool,
}

#[derive(Debug, Args)]
pub struct FilesCommand {
    #[command(subcommand)]
    pub action: FilesAction,
}

#[derive(Debug, Subcommand)]
pub enum FilesAction {
    /// List translation files with their keys
    List {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Create a translation file
    Add {
        filename: String,
        /// Vendor package the file belongs to
        #[arg(long)]
        vendor: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Rename a translation file or move it to another vendor
    Update {
        id: u64,
        filename: String,
        #[arg(long)]
        vendor: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Delete a translation file and all of its keys
    Delete {
        id: u64,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(subcommand)]
    pub action: KeysAction,
}

#[derive(Debug, Subcommand)]
pub enum KeysAction {
    /// List the keys of a translation file
    List {
        file_id: u64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Create a translation key
    Add {
        file_id: u64,
        key: String,
        /// Mark the key as containing HTML
        #[arg(long)]
        html: bool,
        /// Translation as locale=value, repeatable
        #[arg(short = 't', long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Change a translation key
    Update {
        key_id: u64,
        /// New key name
        #[arg(long)]
        key: Option<String>,
        #[arg(long, conflicts_with = "no_html")]
        html: bool,
        #[arg(long)]
        no_html: bool,
        /// Set a translation as locale=value, repeatable
        #[arg(short = 't', long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
        /// Remove the translation of a locale, repeatable
        #[arg(long)]
        remove_locale: Vec<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Delete a translation key
    Delete {
        key_id: u64,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import locale files into the translation store
    Import(ImportCommand),
    /// Export the translation store to locale files
    Export(ExportCommand),
    /// Manage translation files
    Files(FilesCommand),
    /// Manage translation keys
    Keys(KeysCommand),
    /// Initialize a new .transyncrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Import(cmd) => Some(&cmd.common),
            Command::Export(cmd) => Some(&cmd.common),
            Command::Files(cmd) => Some(match &cmd.action {
                FilesAction::List { common }
                | FilesAction::Add { common, .. }
                | FilesAction::Update { common, .. }
                | FilesAction::Delete { common, .. } => common,
            }),
            Command::Keys(cmd) => Some(match &cmd.action {
                KeysAction::List { common, .. }
                | KeysAction::Add { common, .. }
                | KeysAction::Update { common, .. }
                | KeysAction::Delete { common, .. } => common,
            }),
            Command::Init | Command::Serve => None,
        }
    }
}

/// Parse `locale=value`. The value may be empty and may contain `=`.
fn parse_translation(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((locale, value)) if !locale.trim().is_empty() => {
            Ok((locale.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected locale=value, got \"{}\"", input)),
    }
}
