//! Step definitions for council chat scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
