//! Unit tests for the council orchestrator.

use std::sync::Arc;

use crate::advisor::{
    adapters::memory::InMemoryAdvisorRepository,
    domain::{AdvisorDomainError, TransportKind},
    services::AdvisorRegistryServiceError,
};
use crate::council::{
    ChatOutcome, Council, CouncilError, CouncilSettings, DispatchError, DispatchMode,
    FAILURE_MARKER, PromptComposer,
};
use crate::history::{domain::TurnRole, store::HistoryStore};
use crate::test_support::ManualClock;
use crate::transport::ports::{InvocationError, MockAdvisorInvoker};
use camino::Utf8PathBuf;
use chrono::{Duration, NaiveDate};
use rstest::{fixture, rstest};
use tempfile::TempDir;

type TestCouncil = Council<InMemoryAdvisorRepository, MockAdvisorInvoker, ManualClock>;

struct Harness {
    _temp: TempDir,
    root: Utf8PathBuf,
    repository: Arc<InMemoryAdvisorRepository>,
    clock: ManualClock,
}

impl Harness {
    async fn council(&self, invoker: MockAdvisorInvoker) -> TestCouncil {
        let history = HistoryStore::open(&self.root, &self.clock).expect("history opens");
        let settings = CouncilSettings {
            operator_name: "主公".to_owned(),
            seed_advisor: None,
            composer: PromptComposer::new("Be brief.", 30, 3),
        };
        Council::open(
            settings,
            Arc::clone(&self.repository),
            history,
            Arc::new(invoker),
            Arc::new(self.clock.clone()),
        )
        .await
        .expect("council opens")
    }
}

#[fixture]
fn harness() -> Harness {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("history")).expect("utf-8 path");
    Harness {
        _temp: temp,
        root,
        repository: Arc::new(InMemoryAdvisorRepository::new()),
        clock: ManualClock::at("2026-10-18T09:00:00Z"),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

fn echo_invoker() -> MockAdvisorInvoker {
    let mut invoker = MockAdvisorInvoker::new();
    invoker
        .expect_invoke()
        .returning(|advisor, _| Ok(format!("{} agrees", advisor.alias())));
    invoker
}

async fn register_pair(council: &TestCouncil) {
    council
        .register_advisor("alpha", "stub", Vec::new())
        .await
        .expect("register alpha");
    council
        .register_advisor("beta", "stub", Vec::new())
        .await
        .expect("register beta");
}

fn reply_texts(outcome: &ChatOutcome) -> Vec<&str> {
    outcome.replies.iter().map(|turn| turn.text()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mention_chat_records_operator_and_reply(harness: Harness) {
    let council = harness.council(echo_invoker()).await;
    register_pair(&council).await;

    let outcome = council
        .chat("@beta hold the bridge", DispatchMode::Mention)
        .await
        .expect("chat succeeds");

    assert_eq!(outcome.content, "hold the bridge");
    assert_eq!(reply_texts(&outcome), vec!["beta agrees"]);
    let roles: Vec<(TurnRole, &str)> = outcome
        .transcript
        .iter()
        .map(|turn| (turn.role(), turn.speaker()))
        .collect();
    assert_eq!(
        roles,
        vec![(TurnRole::Operator, "主公"), (TurnRole::Advisor, "beta")]
    );
    let persisted = council.load_date(today()).await.expect("log readable");
    assert_eq!(persisted, outcome.transcript);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broadcast_is_sequential_turn_taking(harness: Harness) {
    let mut invoker = MockAdvisorInvoker::new();
    invoker
        .expect_invoke()
        .withf(|advisor, _| advisor.alias().as_str() == "alpha")
        .times(1)
        .returning(|_, _| Ok("alpha says north".to_owned()));
    invoker
        .expect_invoke()
        .withf(|advisor, prompt| {
            advisor.alias().as_str() == "beta" && prompt.contains("alpha (advisor): alpha says north")
        })
        .times(1)
        .returning(|_, _| Ok("beta says south".to_owned()));
    let council = harness.council(invoker).await;
    register_pair(&council).await;

    let outcome = council
        .chat("which way?", DispatchMode::Broadcast)
        .await
        .expect("chat succeeds");

    assert_eq!(reply_texts(&outcome), vec!["alpha says north", "beta says south"]);
    assert_eq!(outcome.transcript.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_advisor_gets_marker_reply_and_others_continue(harness: Harness) {
    let mut invoker = MockAdvisorInvoker::new();
    invoker
        .expect_invoke()
        .withf(|advisor, _| advisor.alias().as_str() == "alpha")
        .returning(|_, _| {
            Err(InvocationError::NonZeroExit {
                alias: "alpha".to_owned(),
                code: Some(2),
                stderr: "quota exceeded".to_owned(),
                hint: None,
            })
        });
    invoker
        .expect_invoke()
        .withf(|advisor, _| advisor.alias().as_str() == "beta")
        .returning(|_, _| Ok("beta is fine".to_owned()));
    let council = harness.council(invoker).await;
    register_pair(&council).await;

    let outcome = council
        .chat("status?", DispatchMode::Broadcast)
        .await
        .expect("chat does not fail");

    let texts = reply_texts(&outcome);
    let first = texts.first().copied().unwrap_or_default();
    assert!(first.starts_with(FAILURE_MARKER));
    assert!(first.contains("quota exceeded"));
    assert_eq!(texts.last().copied(), Some("beta is fine"));
    let persisted = council.load_date(today()).await.expect("log readable");
    assert_eq!(persisted.len(), 3);
}

#[rstest]
#[case("   ", DispatchMode::Mention, DispatchError::EmptyContent)]
#[case("", DispatchMode::Broadcast, DispatchError::EmptyContent)]
#[case("@nobody hi", DispatchMode::Mention, DispatchError::NoTarget)]
#[case("@alpha", DispatchMode::Mention, DispatchError::EmptyContent)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_chats_record_nothing(
    harness: Harness,
    #[case] input: &str,
    #[case] mode: DispatchMode,
    #[case] expected: DispatchError,
) {
    let council = harness.council(MockAdvisorInvoker::new()).await;
    register_pair(&council).await;

    let result = council.chat(input, mode).await;

    assert!(matches!(result, Err(CouncilError::Dispatch(err)) if err == expected));
    assert!(council.transcript().await.is_empty());
    assert!(council.list_dates().await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transcript_is_restored_from_todays_log_only(harness: Harness) {
    {
        let council = harness.council(echo_invoker()).await;
        register_pair(&council).await;
        council
            .chat("@alpha first", DispatchMode::Mention)
            .await
            .expect("chat succeeds");
    }

    let same_day = harness.council(echo_invoker()).await;
    assert_eq!(same_day.transcript().await.len(), 2);

    harness.clock.advance(Duration::days(1));
    let next_day = harness.council(echo_invoker()).await;
    assert!(next_day.transcript().await.is_empty());
    assert_eq!(next_day.list_dates().await.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_clears_session_but_keeps_logs(harness: Harness) {
    let council = harness.council(echo_invoker()).await;
    register_pair(&council).await;
    council
        .chat("@alpha remember this", DispatchMode::Mention)
        .await
        .expect("chat succeeds");

    council.reset().await;

    assert!(council.transcript().await.is_empty());
    assert_eq!(council.load_date(today()).await.expect("log").len(), 2);
    assert_eq!(council.search_dates("remember").await.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recall_from_earlier_days_reaches_the_prompt(harness: Harness) {
    {
        let council = harness.council(echo_invoker()).await;
        register_pair(&council).await;
        council
            .chat("@alpha grain reserves for winter", DispatchMode::Mention)
            .await
            .expect("chat succeeds");
    }
    harness.clock.advance(Duration::days(1));
    let mut invoker = MockAdvisorInvoker::new();
    invoker
        .expect_invoke()
        .withf(|_, prompt| prompt.contains("- 2026-10-18: topics [grain, reserves, winter"))
        .times(1)
        .returning(|_, _| Ok("noted".to_owned()));
    let council = harness.council(invoker).await;

    let outcome = council
        .chat("@alpha how much grain is left?", DispatchMode::Mention)
        .await
        .expect("chat succeeds");

    assert_eq!(reply_texts(&outcome), vec!["noted"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn command_line_registration_upserts(harness: Harness) {
    let council = harness.council(MockAdvisorInvoker::new()).await;
    council
        .register_from_command_line("gem arg gemini -p")
        .await
        .expect("first registration");

    let updated = council
        .register_from_command_line("gem stdin \"/opt/gemini cli/gemini\"")
        .await
        .expect("second registration");

    assert_eq!(updated.kind(), TransportKind::Stdin);
    assert_eq!(council.list_advisors().await.len(), 1);
    let stored = harness
        .repository
        .stored()
        .expect("stored readable")
        .unwrap_or_default();
    assert_eq!(stored, council.list_advisors().await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_command_line_is_rejected(harness: Harness) {
    let council = harness.council(MockAdvisorInvoker::new()).await;

    let result = council.register_from_command_line("gem arg").await;

    assert!(matches!(
        result,
        Err(CouncilError::Registry(AdvisorRegistryServiceError::Domain(
            AdvisorDomainError::MissingCommand(TransportKind::Arg)
        )))
    ));
    assert!(council.list_advisors().await.is_empty());
}
