//! In-memory advisor repository for tests and ephemeral councils.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::advisor::{
    domain::Advisor,
    ports::{AdvisorRepository, AdvisorRepositoryError, AdvisorRepositoryResult},
};

/// Thread-safe in-memory advisor repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdvisorRepository {
    state: Arc<RwLock<Option<Vec<Advisor>>>>,
}

impl InMemoryAdvisorRepository {
    /// Creates a repository with no stored registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `advisors`.
    #[must_use]
    pub fn with_advisors(advisors: Vec<Advisor>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(advisors))),
        }
    }

    /// Returns the currently stored advisor set.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn stored(&self) -> AdvisorRepositoryResult<Option<Vec<Advisor>>> {
        let state = self.state.read().map_err(|err| {
            AdvisorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone())
    }
}

#[async_trait]
impl AdvisorRepository for InMemoryAdvisorRepository {
    async fn load(&self) -> AdvisorRepositoryResult<Option<Vec<Advisor>>> {
        self.stored()
    }

    async fn save(&self, advisors: &[Advisor]) -> AdvisorRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AdvisorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *state = Some(advisors.to_vec());
        Ok(())
    }
}
