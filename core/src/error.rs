//! Error types for argument processing.
//!
//! Every failure raised by [`process`](crate::process) is a [`ProcessError`].
//! Callers that only care about the category can branch on
//! [`ProcessError::kind`] instead of matching payloads.

use thiserror::Error;

use crate::schema::FieldIssue;

/// Discriminator for [`ProcessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No command token and no default command configured.
    NoCommand,
    /// Command token present but not registered.
    UnknownCommand,
    /// A flag matched neither a declared field nor a reserved key.
    UnknownOption,
    /// Option or positional values were rejected by their schema.
    ValidationFailed,
}

/// Errors raised while processing an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// No command token and no default command configured.
    #[error("no command given")]
    NoCommand,
    /// The first positional does not name a registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The flag as spelled on the command line (`--name` or `-n`).
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// Aggregated `path: reason` pairs, comma-separated.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl ProcessError {
    /// Returns the error category.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::{ErrorKind, ProcessError};
    ///
    /// let err = ProcessError::UnknownOption("--nope".into());
    /// assert_eq!(err.kind(), ErrorKind::UnknownOption);
    /// assert_eq!(err.to_string(), "unknown option: --nope");
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoCommand => ErrorKind::NoCommand,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::UnknownOption(_) => ErrorKind::UnknownOption,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
        }
    }

    /// Collapses schema issues into a single [`ProcessError::ValidationFailed`].
    pub fn from_issues(issues: &[FieldIssue]) -> Self {
        let message = issues
            .iter()
            .map(FieldIssue::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::ValidationFailed(message)
    }
}

/// Convenience alias for results with [`ProcessError`].
pub type Result<T> = std::result::Result<T, ProcessError>;
