//! Advisor registration and persistence for the council.
//!
//! An advisor is a named backend that answers operator questions: either
//! the built-in stub or an external process reached through one of the
//! process transports. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
