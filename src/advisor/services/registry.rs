//! Service layer for advisor registration.
//!
//! Provides [`AdvisorRegistryService`], which owns the in-memory advisor
//! roster and keeps the persisted registry in step with it.

use crate::advisor::{
    domain::{
        Advisor, AdvisorAlias, AdvisorDomainError, AdvisorRoster, AdvisorTransport, TransportKind,
    },
    ports::{AdvisorRepository, AdvisorRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::command_line::split_command_line;

/// Request payload for registering or updating an advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAdvisorRequest {
    alias: String,
    transport: String,
    command_tokens: Vec<String>,
}

impl RegisterAdvisorRequest {
    /// Creates a request from raw operator input.
    ///
    /// `command_tokens` holds the executable followed by its argument
    /// template; it is ignored for the stub transport.
    #[must_use]
    pub fn new(
        alias: impl Into<String>,
        transport: impl Into<String>,
        command_tokens: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            transport: transport.into(),
            command_tokens: command_tokens.into_iter().collect(),
        }
    }

    /// Creates a request for a stub-backed advisor.
    #[must_use]
    pub fn stub(alias: impl Into<String>) -> Self {
        Self::new(alias, TransportKind::Stub.as_str(), Vec::new())
    }

    /// Parses `alias transport command...` with shell-style quoting.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorDomainError::UnterminatedQuote`] for unbalanced
    /// quotes or [`AdvisorDomainError::IncompleteCommandLine`] when the
    /// alias or transport is missing.
    pub fn parse_command_line(line: &str) -> Result<Self, AdvisorDomainError> {
        let mut tokens = split_command_line(line)?.into_iter();
        let (Some(alias), Some(transport)) = (tokens.next(), tokens.next()) else {
            return Err(AdvisorDomainError::IncompleteCommandLine);
        };
        Ok(Self::new(alias, transport, tokens))
    }
}

/// Service-level errors for advisor registration.
#[derive(Debug, Error)]
pub enum AdvisorRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AdvisorDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AdvisorRepositoryError),
}

/// Result type for advisor registry service operations.
pub type AdvisorRegistryServiceResult<T> = Result<T, AdvisorRegistryServiceError>;

/// Advisor registration orchestration service.
///
/// The service holds the authoritative roster in memory and rewrites the
/// repository after every change, so the persisted registry always matches
/// what [`AdvisorRegistryService::advisors`] returns.
#[derive(Debug)]
pub struct AdvisorRegistryService<R>
where
    R: AdvisorRepository,
{
    repository: Arc<R>,
    roster: AdvisorRoster,
}

impl<R> AdvisorRegistryService<R>
where
    R: AdvisorRepository,
{
    /// Loads the roster from `repository`.
    ///
    /// When nothing has been stored yet and `seed_alias` is given, a stub
    /// advisor with that alias is registered and persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRegistryServiceError`] when loading fails, stored
    /// data is invalid, or the seed alias is blank.
    pub async fn open(
        repository: Arc<R>,
        seed_alias: Option<&str>,
    ) -> AdvisorRegistryServiceResult<Self> {
        let stored = repository.load().await?;
        let fresh_install = stored.is_none();
        let mut service = Self {
            repository,
            roster: AdvisorRoster::from_advisors(stored.unwrap_or_default()),
        };

        if fresh_install && let Some(alias) = seed_alias {
            info!(alias, "seeding advisor registry with stub advisor");
            service.register(RegisterAdvisorRequest::stub(alias)).await?;
        }

        debug!(count = service.roster.len(), "advisor registry loaded");
        Ok(service)
    }

    /// Registers a new advisor or replaces the one with the same alias.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRegistryServiceError::Domain`] when the alias is
    /// blank, the transport is unknown, or a process transport lacks a
    /// command, and [`AdvisorRegistryServiceError::Repository`] when the
    /// registry cannot be persisted. Validation happens before any state
    /// changes.
    pub async fn register(
        &mut self,
        request: RegisterAdvisorRequest,
    ) -> AdvisorRegistryServiceResult<Advisor> {
        let RegisterAdvisorRequest {
            alias,
            transport,
            command_tokens,
        } = request;

        let advisor_alias = AdvisorAlias::new(alias)?;
        let kind = TransportKind::try_from(transport.as_str())?;
        let advisor = Advisor::new(
            advisor_alias,
            AdvisorTransport::from_tokens(kind, command_tokens)?,
        );

        let mut updated = self.roster.clone();
        let replaced = updated.upsert(advisor.clone());
        self.repository.save(updated.as_slice()).await?;
        self.roster = updated;

        info!(
            alias = %advisor.alias(),
            transport = %advisor.kind(),
            replaced,
            "advisor registered"
        );
        Ok(advisor)
    }

    /// Returns all advisors in registration order.
    #[must_use]
    pub fn advisors(&self) -> &[Advisor] {
        self.roster.as_slice()
    }

    /// Returns the roster.
    #[must_use]
    pub const fn roster(&self) -> &AdvisorRoster {
        &self.roster
    }

    /// Finds an advisor by alias.
    #[must_use]
    pub fn find(&self, alias: &AdvisorAlias) -> Option<&Advisor> {
        self.roster.find(alias)
    }
}
