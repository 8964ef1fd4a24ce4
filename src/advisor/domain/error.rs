//! Error types for advisor domain validation and parsing.

use super::TransportKind;
use thiserror::Error;

/// Errors returned while constructing advisor domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisorDomainError {
    /// The alias is empty after trimming.
    #[error("advisor alias must not be empty")]
    EmptyAlias,

    /// The alias contains a character that cannot follow `@` in a mention.
    #[error("advisor alias must not contain whitespace or '@' (found {0:?})")]
    InvalidAliasCharacter(char),

    /// The transport name is not one of the supported calling conventions.
    #[error("unknown transport '{0}' (expected stub, arg or stdin)")]
    UnknownTransport(String),

    /// A process transport was requested without any command tokens.
    #[error("{0} transport requires a command")]
    MissingCommand(TransportKind),

    /// The executable is empty after trimming.
    #[error("advisor executable must not be empty")]
    EmptyExecutable,

    /// A command line ended inside a quoted value.
    #[error("unterminated quoted value in command line")]
    UnterminatedQuote,

    /// A command line did not carry both an alias and a transport.
    #[error("usage: <alias> <transport> [command...]")]
    IncompleteCommandLine,
}
