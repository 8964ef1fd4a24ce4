//! Advisor transport configuration value objects.

use super::AdvisorDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Argument token replaced by the composed prompt for argument transports.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// Calling convention used to hand a prompt to an advisor backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Built-in canned responder; no process is started.
    Stub,
    /// The prompt is passed as a process argument.
    Arg,
    /// The prompt is written to the process's standard input.
    Stdin,
}

impl TransportKind {
    /// Returns the canonical storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Arg => "arg",
            Self::Stdin => "stdin",
        }
    }
}

impl TryFrom<&str> for TransportKind {
    type Error = AdvisorDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stub" | "mock" | "internal-stub" => Ok(Self::Stub),
            "arg" | "pass-as-argument" => Ok(Self::Arg),
            "stdin" | "pass-via-input" => Ok(Self::Stdin),
            _ => Err(AdvisorDomainError::UnknownTransport(value.to_owned())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executable plus argument template for a process-backed advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    executable: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorDomainError::EmptyExecutable`] when `executable` is
    /// empty after trimming.
    pub fn new(executable: impl Into<String>) -> Result<Self, AdvisorDomainError> {
        let normalized = executable.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(AdvisorDomainError::EmptyExecutable);
        }

        Ok(Self {
            executable: normalized,
            args: Vec::new(),
        })
    }

    /// Replaces the argument template.
    #[must_use]
    pub fn with_args(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.args = values.into_iter().collect();
        self
    }

    /// Returns the executable as configured (name or path).
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Returns the argument template.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns `true` when any template argument carries [`PROMPT_PLACEHOLDER`].
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.args.iter().any(|arg| arg.contains(PROMPT_PLACEHOLDER))
    }

    /// Builds the argument list with `prompt` substituted.
    ///
    /// The prompt replaces the placeholder in place when the template has
    /// one; otherwise it is appended as one final argument.
    #[must_use]
    pub fn arguments_with_prompt(&self, prompt: &str) -> Vec<String> {
        if self.has_placeholder() {
            return self
                .args
                .iter()
                .map(|arg| arg.replace(PROMPT_PLACEHOLDER, prompt))
                .collect();
        }

        let mut arguments = self.args.clone();
        arguments.push(prompt.to_owned());
        arguments
    }

    /// Renders the command as a single display line.
    #[must_use]
    pub fn display_line(&self) -> String {
        std::iter::once(self.executable.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Transport configuration for an advisor.
///
/// The stub variant carries no command; both process variants require one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorTransport {
    /// Built-in canned responder.
    Stub,
    /// Prompt passed as a process argument.
    Arg(CommandSpec),
    /// Prompt written to process standard input.
    Stdin(CommandSpec),
}

impl AdvisorTransport {
    /// Builds a transport from a kind and raw command tokens.
    ///
    /// The first token is the executable and the rest form the argument
    /// template. Tokens are ignored for the stub transport.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorDomainError::MissingCommand`] when a process
    /// transport has no tokens, or [`AdvisorDomainError::EmptyExecutable`]
    /// when the executable token is blank.
    pub fn from_tokens(
        kind: TransportKind,
        tokens: impl IntoIterator<Item = String>,
    ) -> Result<Self, AdvisorDomainError> {
        if kind == TransportKind::Stub {
            return Ok(Self::Stub);
        }

        let mut remaining = tokens.into_iter();
        let executable = remaining
            .next()
            .ok_or(AdvisorDomainError::MissingCommand(kind))?;
        let command = CommandSpec::new(executable)?.with_args(remaining);

        Ok(match kind {
            TransportKind::Stdin => Self::Stdin(command),
            TransportKind::Arg | TransportKind::Stub => Self::Arg(command),
        })
    }

    /// Returns the calling convention.
    #[must_use]
    pub const fn kind(&self) -> TransportKind {
        match self {
            Self::Stub => TransportKind::Stub,
            Self::Arg(_) => TransportKind::Arg,
            Self::Stdin(_) => TransportKind::Stdin,
        }
    }

    /// Returns the process command, if any.
    #[must_use]
    pub const fn command(&self) -> Option<&CommandSpec> {
        match self {
            Self::Stub => None,
            Self::Arg(command) | Self::Stdin(command) => Some(command),
        }
    }
}
