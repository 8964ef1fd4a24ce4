//! The council: routing operator utterances to advisors.
//!
//! [`dispatch`] decides who is addressed, [`prompt`] builds what each
//! advisor sees, and [`service`] runs whole chat turns under one lock.

pub mod dispatch;
pub mod prompt;
pub mod service;

pub use dispatch::{DispatchError, DispatchMode, DispatchPlan};
pub use prompt::{PromptComposer, PromptError};
pub use service::{
    ChatOutcome, Council, CouncilError, CouncilResult, CouncilSettings, FAILURE_MARKER,
};

#[cfg(test)]
mod tests;
