use std::process::ExitCode;

use crate::error::Error;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed successfully
/// - `Failure` (1): Input was rejected (validation error, unknown id, conflict)
/// - `Error` (2): Command failed (parse error, missing directory, I/O, config error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Command rejected its input.
    Failure,
    /// Command failed.
    Error,
}

impl ExitStatus {
    /// Pick the status for an error returned by a command.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<Error>() {
            Some(Error::Validation(_) | Error::NotFound { .. } | Error::UniquenessViolation { .. }) => {
                ExitStatus::Failure
            }
            _ => ExitStatus::Error,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
