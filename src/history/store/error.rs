//! History store errors.

use std::io;
use thiserror::Error;

/// Result type for history store operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors returned by the history store.
///
/// Malformed log lines and a missing or corrupt index are recovered from
/// locally; everything here is a genuine storage failure.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history directory could not be created or opened.
    #[error("failed to open history directory {path}: {source}")]
    OpenDirectory {
        /// Directory path.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Reading or writing a history file failed.
    #[error("failed to {action} {file}: {source}")]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// File name within the history directory.
        file: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A record could not be encoded for storage.
    #[error("failed to encode record for {file}: {source}")]
    Encode {
        /// File name within the history directory.
        file: String,
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl HistoryError {
    pub(super) fn io(action: &'static str, file: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            action,
            file: file.into(),
            source,
        }
    }

    pub(super) fn encode(file: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            file: file.into(),
            source,
        }
    }
}
