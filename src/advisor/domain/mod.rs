//! Domain model for council advisors.
//!
//! Advisors pair a unique operator-chosen alias with the transport used to
//! reach their backend. All infrastructure concerns are kept outside the
//! domain boundary.

mod advisor;
mod alias;
mod error;
mod roster;
mod transport;

pub use advisor::Advisor;
pub use alias::AdvisorAlias;
pub use error::AdvisorDomainError;
pub use roster::AdvisorRoster;
pub use transport::{AdvisorTransport, CommandSpec, PROMPT_PLACEHOLDER, TransportKind};
