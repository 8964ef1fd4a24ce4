//! Invocation port used by the council to reach advisor backends.

use crate::advisor::domain::Advisor;
use async_trait::async_trait;
use std::io;
use thiserror::Error;

/// Result of one advisor invocation: the reply text or the failure detail.
pub type InvocationResult<T> = Result<T, InvocationError>;

/// Advisor backend invocation contract.
///
/// One call hands one composed prompt to one advisor and yields its reply.
/// Failures are per advisor, so callers can carry on with other targets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvisorInvoker: Send + Sync {
    /// Sends `prompt` to `advisor` and returns the normalized reply text.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the backend cannot be started, its
    /// I/O fails, or it exits unsuccessfully.
    async fn invoke(&self, advisor: &Advisor, prompt: &str) -> InvocationResult<String>;
}

/// Errors returned while invoking an advisor backend.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The backend process could not be started, even through the shell.
    #[error("advisor {alias} could not start `{program}`: {source}")]
    Spawn {
        /// Advisor alias.
        alias: String,
        /// Program that failed to start.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// Exchanging data with a running backend failed.
    #[error("advisor {alias} I/O failure: {source}")]
    Io {
        /// Advisor alias.
        alias: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The backend exited unsuccessfully.
    #[error(
        "advisor {alias} exited with {status}: {stderr}{suffix}",
        status = exit_label(*.code),
        suffix = hint_suffix(.hint.as_deref())
    )]
    NonZeroExit {
        /// Advisor alias.
        alias: String,
        /// Exit code, absent when the process was killed by a signal.
        code: Option<i32>,
        /// Trimmed standard error, or a placeholder when it was empty.
        stderr: String,
        /// Command resolution hint for "not found" failures.
        hint: Option<String>,
    },
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_owned(), |value| format!("code {value}"))
}

fn hint_suffix(hint: Option<&str>) -> String {
    hint.map(|text| format!("; {text}")).unwrap_or_default()
}
