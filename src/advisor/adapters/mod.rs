//! Adapter implementations for the advisor registry port.

pub mod json_file;
pub mod memory;
