//! Interactive front end for the council.
//!
//! Usage:
//!
//! ```text
//! council [--config FILE] [--data-dir DIR] [--log-level LEVEL]
//! ```
//!
//! Reads one command per line from standard input and prints advisor
//! replies to standard output. Logs go to standard error. Type `/help` for
//! the command list.

mod cli;
mod repl;

use clap::Parser;
use cli::CliArgs;
use council::advisor::adapters::json_file::JsonFileAdvisorRepository;
use council::config::CouncilConfig;
use council::council::Council;
use council::history::store::HistoryStore;
use council::transport::adapters::process::ProcessInvoker;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(config: &CouncilConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = CliArgs::parse();
    let (config_path, config) = args.resolve_config();
    init_tracing(&config);
    info!(config = %config_path, data_dir = %config.data_dir, "starting council");

    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(JsonFileAdvisorRepository::open(&config.data_dir())?);
    let history = HistoryStore::open(&config.history_dir(), &*clock)?;
    let invoker = Arc::new(ProcessInvoker::new(config.shell.login_shell()));
    let council = Council::open(
        config.council_settings(),
        repository,
        history,
        invoker,
        clock,
    )
    .await?;

    let mut stdout = tokio::io::stdout();
    let banner = format!(
        "council ready with {} advisor(s); type /help for commands\n",
        council.list_advisors().await.len()
    );
    stdout.write_all(banner.as_bytes()).await?;
    stdout.flush().await?;

    repl::run(&council, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
    Ok(())
}
