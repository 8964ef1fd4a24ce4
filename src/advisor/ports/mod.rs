//! Port contracts for advisor persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the registration
//! service.

pub mod repository;

pub use repository::{AdvisorRepository, AdvisorRepositoryError, AdvisorRepositoryResult};
