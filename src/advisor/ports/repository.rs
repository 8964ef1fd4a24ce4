//! Repository port for the persisted advisor registry.

use crate::advisor::domain::Advisor;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for advisor repository operations.
pub type AdvisorRepositoryResult<T> = Result<T, AdvisorRepositoryError>;

/// Advisor registry persistence contract.
///
/// The registry is always written as a whole: the full ordered advisor set
/// replaces whatever was stored before.
#[async_trait]
pub trait AdvisorRepository: Send + Sync {
    /// Loads the stored advisor set in registration order.
    ///
    /// Returns `None` when no registry has been stored yet, which lets the
    /// caller distinguish a fresh install from an emptied registry.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRepositoryError::InvalidPersistedData`] when a stored
    /// record cannot be reconstructed, or
    /// [`AdvisorRepositoryError::Persistence`] when storage access fails.
    async fn load(&self) -> AdvisorRepositoryResult<Option<Vec<Advisor>>>;

    /// Replaces the stored advisor set.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRepositoryError::Persistence`] when storage access
    /// fails.
    async fn save(&self, advisors: &[Advisor]) -> AdvisorRepositoryResult<()>;
}

/// Errors returned by advisor repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AdvisorRepositoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted advisor data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("advisor registry persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdvisorRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted records.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
