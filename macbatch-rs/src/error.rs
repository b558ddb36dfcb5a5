//! Fatal session errors.
//!
//! Every variant halts the current macro.  Non-fatal conditions are
//! [`Warning`](crate::console::Warning)s and never reach this type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The macro file could not be opened.
    #[error("cannot open macro file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the macro source failed part way through.
    #[error("error reading macro: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("line {line}: command not found: {command}")]
    CommandNotFound { command: String, line: usize },

    #[error("line {line}: illegal application state: {command}")]
    IllegalState { command: String, line: usize },

    /// `index` is the offending parameter position reported by the executor.
    #[error("line {line}: illegal parameter ({index}): {command}")]
    IllegalParameter {
        command: String,
        index: u32,
        line: usize,
    },
}

impl SessionError {
    /// The command that caused a dispatch failure, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            SessionError::CommandNotFound { command, .. }
            | SessionError::IllegalState { command, .. }
            | SessionError::IllegalParameter { command, .. } => Some(command),
            SessionError::Open { .. } | SessionError::Read { .. } => None,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(source: io::Error) -> Self {
        SessionError::Read { source }
    }
}
