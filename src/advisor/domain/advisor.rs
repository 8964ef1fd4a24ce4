//! Advisor aggregate.

use super::{AdvisorAlias, AdvisorTransport, TransportKind};

/// A registered advisor: a unique alias bound to a backend transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisor {
    alias: AdvisorAlias,
    transport: AdvisorTransport,
}

impl Advisor {
    /// Creates an advisor.
    #[must_use]
    pub const fn new(alias: AdvisorAlias, transport: AdvisorTransport) -> Self {
        Self { alias, transport }
    }

    /// Creates an advisor backed by the built-in stub.
    #[must_use]
    pub const fn stub(alias: AdvisorAlias) -> Self {
        Self::new(alias, AdvisorTransport::Stub)
    }

    /// Returns the alias.
    #[must_use]
    pub const fn alias(&self) -> &AdvisorAlias {
        &self.alias
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn transport(&self) -> &AdvisorTransport {
        &self.transport
    }

    /// Returns the calling convention.
    #[must_use]
    pub const fn kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Describes the backend command for listings.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.transport
            .command()
            .map_or_else(|| "(built-in stub)".to_owned(), |command| command.display_line())
    }
}
