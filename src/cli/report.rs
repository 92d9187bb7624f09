//! Report formatting and printing utilities.
//!
//! Human readable output for every command, plus cargo-style rendering of
//! errors. Separate from core logic so that transync can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    exporter::ExportReport,
    importer::{ImportReport, ImportWrite},
    model::{FileWithKeys, TranslationFile, TranslationKey},
};
use crate::error::{Error, ParseError, ValidationErrors};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print any serializable result as pretty JSON (for `--json`).
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_import(report: &ImportReport, dry_run: bool) {
    print_import_to(report, dry_run, &mut io::stdout().lock());
}

pub fn print_import_to<W: Write>(report: &ImportReport, dry_run: bool, writer: &mut W) {
    for write in &report.writes {
        let line = match write {
            ImportWrite::Purged => format!("{} all files and keys", "Purged".red().bold()),
            ImportWrite::FileCreated { file } => {
                format!("{} file {}", "Created".green().bold(), file.bold())
            }
            ImportWrite::KeyCreated { file, key, locales } => format!(
                "{} key {}: {} ({})",
                "Created".green().bold(),
                file,
                key.bold(),
                locales.join(", ")
            ),
            ImportWrite::KeyUpdated { file, key, locales } => format!(
                "{} key {}: {} ({})",
                "Updated".yellow().bold(),
                file,
                key.bold(),
                locales.join(", ")
            ),
        };
        let _ = writeln!(writer, "  {}", line);
    }

    for file in &report.skipped_files {
        let _ = writeln!(
            writer,
            "  {} existing file {} (use {} or {})",
            "Skipped".dimmed(),
            file,
            "--fill-missing".cyan(),
            "--replace-existing".cyan()
        );
    }

    for skipped in &report.skipped_keys {
        let _ = writeln!(
            writer,
            "  {} key {}: {} (collides with {})",
            "Skipped".dimmed(),
            skipped.file,
            skipped.key.bold(),
            skipped.conflicts_with
        );
    }

    let summary = format!(
        "{} {}, {} {} created, {} {} updated",
        report.files_created,
        plural(report.files_created, "file", "files"),
        report.keys_created,
        plural(report.keys_created, "key", "keys"),
        report.keys_updated,
        plural(report.keys_updated, "key", "keys"),
    );

    if dry_run {
        let _ = writeln!(writer, "{} {}", "Would import".yellow().bold(), summary);
        if !report.is_empty() {
            let _ = writeln!(
                writer,
                "Run without {} to save these changes.",
                "--dry-run".cyan()
            );
        }
    } else if report.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to import".green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Imported {}", summary).green()
        );
    }
}

pub fn print_export(report: &ExportReport) {
    print_export_to(report, &mut io::stdout().lock());
}

pub fn print_export_to<W: Write>(report: &ExportReport, writer: &mut W) {
    for file in &report.files {
        let _ = writeln!(
            writer,
            "  {} {} ({} {})",
            "Wrote".green().bold(),
            file.path,
            file.keys,
            plural(file.keys, "key", "keys")
        );
    }

    let files = report.files.len();
    let keys = report.key_count();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Exported {} {} to {} {} in {}",
            keys,
            plural(keys, "key", "keys"),
            files,
            plural(files, "file", "files"),
            report.destination.display()
        )
        .green()
    );
}

pub fn print_files(files: &[FileWithKeys]) {
    print_files_to(files, &mut io::stdout().lock());
}

pub fn print_files_to<W: Write>(files: &[FileWithKeys], writer: &mut W) {
    if files.is_empty() {
        let _ = writeln!(writer, "No translation files.");
        return;
    }

    let width = id_width(files.iter().map(|f| f.file.id));
    for file in files {
        let count = file.translation_keys.len();
        let _ = writeln!(
            writer,
            "{}  {}  {}",
            format!("{:>width$}", file.file.id, width = width).blue(),
            file.file.identity().bold(),
            format!("({} {})", count, plural(count, "key", "keys")).dimmed(),
        );
    }
}

pub fn print_keys(keys: &[TranslationKey]) {
    print_keys_to(keys, &mut io::stdout().lock());
}

pub fn print_keys_to<W: Write>(keys: &[TranslationKey], writer: &mut W) {
    if keys.is_empty() {
        let _ = writeln!(writer, "No translation keys.");
        return;
    }

    let width = id_width(keys.iter().map(|k| k.id));
    for key in keys {
        print_key_to(key, width, writer);
    }
}

fn print_key_to<W: Write>(key: &TranslationKey, width: usize, writer: &mut W) {
    let html = if key.is_html {
        format!(" {}", "[html]".cyan())
    } else {
        String::new()
    };
    let _ = writeln!(
        writer,
        "{}  {}{}",
        format!("{:>width$}", key.id, width = width).blue(),
        key.key.bold(),
        html,
    );
    for (locale, value) in &key.translations {
        let shown = if value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            value.clone()
        };
        let _ = writeln!(writer, "{:>width$}    {}: {}", "", locale, shown, width = width);
    }
}

/// `✓ Created file auth (id 3)` style confirmation.
pub fn print_file_action(action: &str, file: &TranslationFile) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} file {} (id {})", action, file.identity(), file.id).green()
    );
}

pub fn print_key_action(action: &str, key: &TranslationKey) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} key {} (id {})", action, key.key, key.id).green()
    );
    print_key_to(key, id_width([key.id].into_iter()), &mut io::stdout().lock());
}

pub fn print_init() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}

/// Print a command error to stderr.
pub fn print_error(err: &anyhow::Error) {
    print_error_to(err, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &anyhow::Error, writer: &mut W) {
    match err.downcast_ref::<Error>() {
        Some(Error::Parse(parse)) => print_parse_error(parse, writer),
        Some(Error::Validation(errors)) => print_validation_errors(errors, writer),
        _ => {
            let _ = writeln!(writer, "{}: {:#}", "error".bold().red(), err);
        }
    }
}

fn print_parse_error<W: Write>(err: &ParseError, writer: &mut W) {
    let _ = writeln!(writer, "{}: {}", "error".bold().red(), err.message);
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        err.path.display(),
        err.line,
        err.col
    );

    let Some(source_line) = &err.source_line else {
        return;
    };

    let width = err.line.to_string().len();
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{} {} {}",
        format!("{:>width$}", err.line, width = width).blue(),
        "|".blue(),
        source_line,
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = source_line.chars().take(err.col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = width,
        padding = caret_padding
    );
}

fn print_validation_errors<W: Write>(errors: &ValidationErrors, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}",
        "error".bold().red(),
        "The given data was invalid."
    );
    for error in &errors.errors {
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            format!("{}:", error.field).bold(),
            error.message
        );
    }
    let _ = writeln!(
        writer,
        "\n{} {} {}",
        FAILURE_MARK.red(),
        errors.errors.len(),
        plural(errors.errors.len(), "problem", "problems")
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn id_width(ids: impl Iterator<Item = u64>) -> usize {
    ids.max().map(|n| n.to_string().len()).unwrap_or(1)
}
