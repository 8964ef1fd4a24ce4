//! Council: a war council of command-line AI advisors.
//!
//! An operator registers named advisors, each backed by an external
//! command-line program or by a built-in stub, and talks to them in one
//! shared conversation. Every advisor prompt carries the recent transcript
//! and notes recalled from earlier days. Conversations are kept as
//! append-only day logs with a derived keyword index.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Trait contracts for persistence and advisor invocation
//! - **Adapters**: JSON-file and in-memory registries, the process invoker
//!
//! # Modules
//!
//! - [`advisor`]: Advisor registry
//! - [`transport`]: Advisor invocation and output normalisation
//! - [`history`]: Day logs, day index and recall
//! - [`council`]: Dispatch, prompt composition and orchestration
//! - [`config`]: TOML configuration

pub mod advisor;
pub mod config;
pub mod council;
pub mod history;
pub mod transport;

#[cfg(test)]
mod test_support;
