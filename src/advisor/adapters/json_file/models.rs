//! Serialised record models for the advisor registry file.

use crate::advisor::domain::{
    Advisor, AdvisorAlias, AdvisorDomainError, AdvisorTransport, TransportKind,
};
use serde::{Deserialize, Serialize};

/// Top-level registry document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Advisor records in registration order.
    #[serde(default, alias = "models")]
    pub advisors: Vec<AdvisorRecord>,
}

/// One persisted advisor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorRecord {
    /// Unique advisor alias.
    pub alias: String,
    /// Transport name in canonical form.
    pub transport: String,
    /// Executable name or path; empty for the stub transport.
    #[serde(default, alias = "cmd")]
    pub executable: String,
    /// Argument template.
    #[serde(default)]
    pub args: Vec<String>,
}

impl From<&Advisor> for AdvisorRecord {
    fn from(advisor: &Advisor) -> Self {
        let (executable, args) = advisor.transport().command().map_or_else(
            || (String::new(), Vec::new()),
            |command| (command.executable().to_owned(), command.args().to_vec()),
        );

        Self {
            alias: advisor.alias().as_str().to_owned(),
            transport: advisor.kind().as_str().to_owned(),
            executable,
            args,
        }
    }
}

impl TryFrom<AdvisorRecord> for Advisor {
    type Error = AdvisorDomainError;

    fn try_from(record: AdvisorRecord) -> Result<Self, Self::Error> {
        let alias = AdvisorAlias::new(record.alias)?;
        let kind = TransportKind::try_from(record.transport.as_str())?;
        let tokens = if record.executable.trim().is_empty() {
            Vec::new()
        } else {
            std::iter::once(record.executable).chain(record.args).collect()
        };
        let transport = AdvisorTransport::from_tokens(kind, tokens)?;
        Ok(Self::new(alias, transport))
    }
}
