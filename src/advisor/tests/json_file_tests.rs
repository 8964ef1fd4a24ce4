//! Unit tests for the JSON file advisor repository.

use crate::advisor::{
    adapters::json_file::{JsonFileAdvisorRepository, REGISTRY_FILE_NAME},
    domain::{Advisor, AdvisorAlias, AdvisorTransport, CommandSpec, TransportKind},
    ports::{AdvisorRepository, AdvisorRepositoryError},
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let temp = TempDir::new().expect("temp dir should be created");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("data"))
        .expect("temp path should be UTF-8");
    Workspace { _temp: temp, root }
}

fn sample_advisors() -> Vec<Advisor> {
    let command = CommandSpec::new("claude")
        .expect("valid executable")
        .with_args(["-p".to_owned()]);
    vec![
        Advisor::stub(AdvisorAlias::new("诸葛亮").expect("valid alias")),
        Advisor::new(
            AdvisorAlias::new("claude").expect("valid alias"),
            AdvisorTransport::Stdin(command),
        ),
    ]
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_loads_as_none(workspace: Workspace) {
    let repository = JsonFileAdvisorRepository::open(&workspace.root).expect("open repository");

    let loaded = repository.load().await.expect("load should succeed");

    assert!(loaded.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_roster_survives_reopen(workspace: Workspace) {
    let repository = JsonFileAdvisorRepository::open(&workspace.root).expect("open repository");
    repository
        .save(&sample_advisors())
        .await
        .expect("save should succeed");

    let reopened = JsonFileAdvisorRepository::open(&workspace.root).expect("reopen repository");
    let loaded = reopened.load().await.expect("load should succeed");

    assert_eq!(loaded, Some(sample_advisors()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_field_names_are_accepted(workspace: Workspace) {
    std::fs::create_dir_all(&workspace.root).expect("create data dir");
    std::fs::write(
        workspace.root.join(REGISTRY_FILE_NAME),
        r#"{"models":[{"alias":"gem","transport":"pass-as-argument","cmd":"gemini","args":["-p"]},{"alias":"m","transport":"mock"}]}"#,
    )
    .expect("write legacy registry");
    let repository = JsonFileAdvisorRepository::open(&workspace.root).expect("open repository");

    let loaded = repository
        .load()
        .await
        .expect("load should succeed")
        .expect("registry present");

    let kinds: Vec<TransportKind> = loaded.iter().map(Advisor::kind).collect();
    assert_eq!(kinds, vec![TransportKind::Arg, TransportKind::Stub]);
    assert_eq!(
        loaded.first().map(Advisor::command_line).as_deref(),
        Some("gemini -p")
    );
}

#[rstest]
#[case("not json")]
#[case(r#"{"advisors":[{"alias":"x","transport":"arg","executable":""}]}"#)]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_registry_is_reported(workspace: Workspace, #[case] contents: &str) {
    std::fs::create_dir_all(&workspace.root).expect("create data dir");
    std::fs::write(workspace.root.join(REGISTRY_FILE_NAME), contents)
        .expect("write corrupt registry");
    let repository = JsonFileAdvisorRepository::open(&workspace.root).expect("open repository");

    let result = repository.load().await;

    assert!(matches!(
        result,
        Err(AdvisorRepositoryError::InvalidPersistedData(_))
    ));
}
