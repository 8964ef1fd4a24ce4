//! Durable conversation history.
//!
//! Every turn is appended to a per-day log. Each day also has a derived
//! index entry (topics, highlights, summary, counts) that is rebuilt from
//! the log whenever the day changes and is used for keyword recall.

pub mod domain;
pub mod store;

#[cfg(test)]
mod tests;
