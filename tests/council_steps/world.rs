//! Shared world state for council chat scenarios.

use std::sync::Arc;

use crate::test_helpers::{SteppedClock, TempRoot};
use council::advisor::adapters::memory::InMemoryAdvisorRepository;
use council::council::{ChatOutcome, Council, CouncilError, CouncilSettings};
use council::history::store::HistoryStore;
use council::transport::adapters::process::{LoginShell, ProcessInvoker};
use council::transport::adapters::recording::RecordingInvoker;
use rstest::fixture;

/// Invoker used by the world: real process invocation, recorded.
pub type TestInvoker = RecordingInvoker<ProcessInvoker>;

/// Council type used by the world.
pub type TestCouncil = Council<InMemoryAdvisorRepository, TestInvoker, SteppedClock>;

/// Scenario world for council chat behaviour tests.
pub struct CouncilWorld {
    /// Data root for history files.
    pub root: TempRoot,
    /// Clock shared with the council.
    pub clock: SteppedClock,
    /// Recorder shared with the council.
    pub invoker: TestInvoker,
    /// Council under test, opened by the first given step.
    pub council: Option<TestCouncil>,
    /// Result of the last chat call.
    pub last_chat: Option<Result<ChatOutcome, CouncilError>>,
}

impl CouncilWorld {
    /// Creates a world with no council opened yet.
    #[must_use]
    pub fn new() -> Self {
        let shell = LoginShell::new("/bin/sh", ["-c".to_owned()]);
        Self {
            root: TempRoot::new(),
            clock: SteppedClock::at("2026-10-18T09:00:00Z"),
            invoker: RecordingInvoker::new(ProcessInvoker::new(shell)),
            council: None,
            last_chat: None,
        }
    }

    /// Opens a council over the world's data root.
    ///
    /// # Errors
    ///
    /// Returns an error when the history store or council cannot open.
    pub fn open_council(&mut self) -> Result<(), eyre::Report> {
        let history = HistoryStore::open(&self.root.path().join("history"), &self.clock)?;
        let council = run_async(Council::open(
            CouncilSettings::default(),
            Arc::new(InMemoryAdvisorRepository::new()),
            history,
            Arc::new(self.invoker.clone()),
            Arc::new(self.clock.clone()),
        ))?;
        self.council = Some(council);
        Ok(())
    }

    /// Returns the opened council.
    ///
    /// # Errors
    ///
    /// Returns an error when no council has been opened.
    pub fn council(&self) -> Result<&TestCouncil, eyre::Report> {
        self.council
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no council opened in scenario world"))
    }

    /// Returns the outcome of the last successful chat.
    ///
    /// # Errors
    ///
    /// Returns an error when no chat ran or the last chat failed.
    pub fn last_outcome(&self) -> Result<&ChatOutcome, eyre::Report> {
        match &self.last_chat {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(err)) => Err(eyre::eyre!("last chat failed: {err}")),
            None => Err(eyre::eyre!("no chat has run in scenario world")),
        }
    }
}

impl Default for CouncilWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CouncilWorld {
    CouncilWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
