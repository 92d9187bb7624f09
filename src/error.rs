//! Error types for the import/export engine.
//!
//! Library code returns [`Result`]; the CLI and MCP layers wrap these errors in
//! `anyhow` and downcast them again when choosing an exit status or rendering
//! a report.

use std::{fmt, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The import root (or another required directory) is missing.
    #[error("The directory \"{}\" does not exist.", .0.display())]
    PathNotFound(PathBuf),

    /// A locale file could not be parsed. Fatal for the whole import.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A create would duplicate a unique identity, or the store was modified
    /// by another writer since it was opened.
    #[error("{entity} {identity} already exists")]
    UniquenessViolation {
        entity: &'static str,
        identity: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn duplicate(entity: &'static str, identity: impl Into<String>) -> Self {
        Self::UniquenessViolation {
            entity,
            identity: identity.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// A syntax error in a PHP or JSON locale file.
///
/// `line` and `col` are 1-based; `source_line` holds the offending line so the
/// report can draw a caret under it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} in {}:{line}:{col}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub col: usize,
    pub message: String,
    pub source_line: Option<String>,
}

impl ParseError {
    /// Build an error located at a byte offset of `content`.
    pub fn at_offset(
        path: impl Into<PathBuf>,
        content: &str,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        let offset = offset.min(content.len());
        let before = &content[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        let source_line = content[line_start..].lines().next().map(str::to_string);

        Self {
            path: path.into(),
            line,
            col,
            message: message.into(),
            source_line,
        }
    }

    /// Build an error from a 1-based line/column pair (as reported by serde_json).
    pub fn at_line(
        path: impl Into<PathBuf>,
        content: &str,
        line: usize,
        col: usize,
        message: impl Into<String>,
    ) -> Self {
        let source_line = content
            .lines()
            .nth(line.saturating_sub(1))
            .map(str::to_string);

        Self {
            path: path.into(),
            line: line.max(1),
            col: col.max(1),
            message: message.into(),
            source_line,
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field validation failures, collected before any write happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "The given data was invalid ({})", messages.join("; "))
    }
}
