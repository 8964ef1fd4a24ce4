//! Advisor backend invocation.
//!
//! Turns a composed prompt into one clean reply string for a single
//! advisor. The [`ports::AdvisorInvoker`] contract is what the council
//! depends on; [`adapters`] provides the process-backed implementation and
//! a recording wrapper for tests, and [`normalize`] reduces raw backend
//! output to human-facing text.

pub mod adapters;
pub mod normalize;
pub mod ports;

#[cfg(test)]
mod tests;
