//! Council orchestration service.
//!
//! [`Council`] owns the advisor registry, the session transcript and the
//! history store behind one async mutex. A chat turn holds that lock from
//! dispatch to persistence, so turns never interleave. Targets of one turn
//! are consulted strictly in order and each sees the replies given before
//! it in the same turn.

use super::dispatch::{DispatchError, DispatchMode, DispatchPlan};
use super::prompt::{PromptComposer, PromptError};
use crate::advisor::{
    domain::Advisor,
    ports::AdvisorRepository,
    services::{AdvisorRegistryService, AdvisorRegistryServiceError, RegisterAdvisorRequest},
};
use crate::history::{
    domain::{DayIndexEntry, Turn},
    store::{HistoryError, HistoryStore},
};
use crate::transport::ports::{AdvisorInvoker, InvocationError};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Prefix of the reply recorded when an advisor could not be consulted.
pub const FAILURE_MARKER: &str = "[advisor call failed]";

/// Default speaker name for operator turns.
pub const DEFAULT_OPERATOR_NAME: &str = "operator";

/// Errors returned by council operations.
#[derive(Debug, Error)]
pub enum CouncilError {
    /// The utterance could not be routed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Advisor registration failed.
    #[error(transparent)]
    Registry(#[from] AdvisorRegistryServiceError),
    /// Reading or writing history failed.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Result type for council operations.
pub type CouncilResult<T> = Result<T, CouncilError>;

/// Static settings for a council.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilSettings {
    /// Speaker name recorded on operator turns.
    pub operator_name: String,
    /// Alias of the stub advisor registered on a fresh install.
    pub seed_advisor: Option<String>,
    /// Prompt composition settings.
    pub composer: PromptComposer,
}

impl Default for CouncilSettings {
    fn default() -> Self {
        Self {
            operator_name: DEFAULT_OPERATOR_NAME.to_owned(),
            seed_advisor: None,
            composer: PromptComposer::default(),
        }
    }
}

/// Result of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    /// Content the targets received.
    pub content: String,
    /// Advisor turns produced, in dispatch order. Failed consultations
    /// appear as replies starting with [`FAILURE_MARKER`].
    pub replies: Vec<Turn>,
    /// Full session transcript after the turn.
    pub transcript: Vec<Turn>,
}

#[derive(Debug)]
struct CouncilState<R>
where
    R: AdvisorRepository,
{
    registry: AdvisorRegistryService<R>,
    transcript: Vec<Turn>,
    history: HistoryStore,
}

/// The council orchestrator.
#[derive(Debug)]
pub struct Council<R, I, C>
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    state: Mutex<CouncilState<R>>,
    invoker: Arc<I>,
    clock: Arc<C>,
    composer: PromptComposer,
    operator_name: String,
}

impl<R, I, C> Council<R, I, C>
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    /// Opens a council.
    ///
    /// Loads the advisor registry (seeding it on a fresh install) and
    /// restores the session transcript from today's log.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::Registry`] when the registry cannot be
    /// loaded or seeded and [`CouncilError::History`] when today's log
    /// cannot be read.
    pub async fn open(
        settings: CouncilSettings,
        repository: Arc<R>,
        history: HistoryStore,
        invoker: Arc<I>,
        clock: Arc<C>,
    ) -> CouncilResult<Self> {
        let CouncilSettings {
            operator_name,
            seed_advisor,
            composer,
        } = settings;

        let registry = AdvisorRegistryService::open(repository, seed_advisor.as_deref()).await?;
        let today = clock.utc().date_naive();
        let transcript = history.load(today)?;
        info!(
            advisors = registry.advisors().len(),
            restored_turns = transcript.len(),
            %today,
            "council opened"
        );

        Ok(Self {
            state: Mutex::new(CouncilState {
                registry,
                transcript,
                history,
            }),
            invoker,
            clock,
            composer,
            operator_name,
        })
    }

    /// Returns the registered advisors in registration order.
    pub async fn list_advisors(&self) -> Vec<Advisor> {
        self.state.lock().await.registry.advisors().to_vec()
    }

    /// Registers an advisor, replacing any advisor with the same alias.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::Registry`] when validation or persistence
    /// fails; the registry is left unchanged.
    pub async fn register_advisor(
        &self,
        alias: &str,
        transport: &str,
        command_tokens: Vec<String>,
    ) -> CouncilResult<Advisor> {
        let request = RegisterAdvisorRequest::new(alias, transport, command_tokens);
        let mut state = self.state.lock().await;
        Ok(state.registry.register(request).await?)
    }

    /// Registers an advisor from an `alias transport command...` line.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::Registry`] when the line cannot be parsed or
    /// registration fails.
    pub async fn register_from_command_line(&self, line: &str) -> CouncilResult<Advisor> {
        let request = RegisterAdvisorRequest::parse_command_line(line)
            .map_err(AdvisorRegistryServiceError::from)?;
        let mut state = self.state.lock().await;
        Ok(state.registry.register(request).await?)
    }

    /// Runs one chat turn.
    ///
    /// The operator turn is recorded, then each target is consulted in
    /// order. A target that fails gets a reply starting with
    /// [`FAILURE_MARKER`] and the remaining targets still run. The operator
    /// turn and every reply are persisted together at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::Dispatch`] for blank input or when no known
    /// advisor is mentioned, in which case nothing is recorded, and
    /// [`CouncilError::History`] when persisting the turn fails.
    pub async fn chat(&self, text: &str, mode: DispatchMode) -> CouncilResult<ChatOutcome> {
        let utterance = text.trim();
        if utterance.is_empty() {
            return Err(DispatchError::EmptyContent.into());
        }

        let mut state = self.state.lock().await;
        let plan = DispatchPlan::resolve(utterance, state.registry.roster(), mode)?;
        info!(?mode, targets = ?plan.targets(), "dispatching chat turn");

        let operator_turn = Turn::operator(&self.operator_name, plan.content(), &*self.clock);
        state.transcript.push(operator_turn.clone());
        let mut batch = vec![operator_turn];

        for alias in plan.targets() {
            let Some(advisor) = state.registry.find(alias).cloned() else {
                continue;
            };
            let reply = match self.consult(&state, &advisor, plan.content()).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(%alias, error = %err, "advisor consultation failed");
                    format!("{FAILURE_MARKER} {err}")
                }
            };
            let reply_turn = Turn::advisor(alias.as_str(), reply, &*self.clock);
            state.transcript.push(reply_turn.clone());
            batch.push(reply_turn);
        }

        state.history.append(&batch, &*self.clock)?;

        let replies = batch.split_off(1);
        Ok(ChatOutcome {
            content: plan.content().to_owned(),
            replies,
            transcript: state.transcript.clone(),
        })
    }

    /// Clears the session transcript. Day logs are not touched.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        debug!(cleared = state.transcript.len(), "session transcript reset");
        state.transcript.clear();
    }

    /// Returns the session transcript.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.state.lock().await.transcript.clone()
    }

    /// Lists indexed days, newest first.
    pub async fn list_dates(&self) -> Vec<DayIndexEntry> {
        self.state.lock().await.history.list_dates()
    }

    /// Searches indexed days by date, topic or summary text.
    pub async fn search_dates(&self, query: &str) -> Vec<DayIndexEntry> {
        self.state.lock().await.history.search_dates(query)
    }

    /// Loads the full log of one day.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::History`] when the log cannot be read.
    pub async fn load_date(&self, date: NaiveDate) -> CouncilResult<Vec<Turn>> {
        Ok(self.state.lock().await.history.load(date)?)
    }

    async fn consult(
        &self,
        state: &CouncilState<R>,
        advisor: &Advisor,
        question: &str,
    ) -> Result<String, ConsultError> {
        let recall = state.history.recall(question, self.composer.recall_limit());
        let prompt = self.composer.compose(
            advisor.alias().as_str(),
            &state.transcript,
            &recall,
            question,
        )?;
        debug!(alias = %advisor.alias(), prompt_chars = prompt.chars().count(), "prompt composed");
        Ok(self.invoker.invoke(advisor, &prompt).await?)
    }

    /// Returns the operator's speaker name.
    #[must_use]
    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }
}

/// Why one advisor could not be consulted.
#[derive(Debug, Error)]
enum ConsultError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}
