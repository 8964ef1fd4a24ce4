//! Invoker adapters.

pub mod process;
pub mod recording;
pub mod stub;
