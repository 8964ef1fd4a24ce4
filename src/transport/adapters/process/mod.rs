//! Process-backed advisor invoker.
//!
//! Each process advisor runs as a fresh child process per prompt. The
//! executable is resolved against the inherited `PATH` first; when that
//! fails the same argument vector is re-run through a login shell so that
//! profile-level `PATH` changes still apply.

mod resolve;
mod shell;

pub use resolve::resolve_executable;
pub use shell::{LoginShell, shell_escape};

use crate::advisor::domain::{Advisor, AdvisorAlias, AdvisorTransport, CommandSpec};
use crate::transport::adapters::stub::stub_reply;
use crate::transport::normalize::normalize_output;
use crate::transport::ports::{AdvisorInvoker, InvocationError, InvocationResult};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

const EMPTY_STDERR: &str = "(no error output)";

/// Invoker that runs advisor backends as child processes.
///
/// Stub advisors are answered in-process. No timeout is applied: a backend
/// that never exits blocks the caller.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    shell: LoginShell,
    search_path: Option<OsString>,
}

impl ProcessInvoker {
    /// Creates an invoker that searches the process's own `PATH` and falls
    /// back to `shell`.
    #[must_use]
    pub fn new(shell: LoginShell) -> Self {
        Self {
            shell,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Overrides the search path used for executable resolution.
    #[must_use]
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Returns the fallback shell.
    #[must_use]
    pub const fn shell(&self) -> &LoginShell {
        &self.shell
    }

    async fn run_command(
        &self,
        alias: &AdvisorAlias,
        command: &CommandSpec,
        args: &[String],
        input: Option<&str>,
    ) -> InvocationResult<String> {
        let executable = command.executable();
        let resolved = resolve_executable(executable, self.search_path.as_deref());

        let child = match &resolved {
            Some(path) => {
                debug!(%alias, executable = %path, "spawning advisor backend");
                let mut direct = Command::new(path.as_std_path());
                direct.args(args);
                match spawn(direct, input.is_some()) {
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        self.spawn_via_shell(alias, executable, args, input)?
                    }
                    other => other.map_err(|source| InvocationError::Spawn {
                        alias: alias.to_string(),
                        program: path.to_string(),
                        source,
                    })?,
                }
            }
            None => self.spawn_via_shell(alias, executable, args, input)?,
        };

        let output = collect(child, input)
            .await
            .map_err(|source| InvocationError::Io {
                alias: alias.to_string(),
                source,
            })?;

        if !output.status.success() {
            let code = output.status.code();
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            let hint = not_found_hint(&stderr, executable, self.search_path.as_deref());
            info!(%alias, ?code, "advisor backend exited unsuccessfully");
            return Err(InvocationError::NonZeroExit {
                alias: alias.to_string(),
                code,
                stderr: if stderr.is_empty() {
                    EMPTY_STDERR.to_owned()
                } else {
                    stderr
                },
                hint,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reply = normalize_output(stdout.trim());
        if reply.trim().is_empty() {
            return Ok(format!("advisor {alias} produced no content"));
        }
        Ok(reply)
    }

    fn spawn_via_shell(
        &self,
        alias: &AdvisorAlias,
        executable: &str,
        args: &[String],
        input: Option<&str>,
    ) -> InvocationResult<Child> {
        warn!(
            %alias,
            executable,
            shell = self.shell.program(),
            "executable not resolved on PATH; retrying through login shell"
        );
        let argv = std::iter::once(executable).chain(args.iter().map(String::as_str));
        spawn(self.shell.command_for(argv), input.is_some()).map_err(|source| {
            InvocationError::Spawn {
                alias: alias.to_string(),
                program: self.shell.program().to_owned(),
                source,
            }
        })
    }
}

#[async_trait]
impl AdvisorInvoker for ProcessInvoker {
    async fn invoke(&self, advisor: &Advisor, prompt: &str) -> InvocationResult<String> {
        let alias = advisor.alias();
        debug!(%alias, transport = %advisor.kind(), "invoking advisor");
        match advisor.transport() {
            AdvisorTransport::Stub => Ok(stub_reply(alias, prompt)),
            AdvisorTransport::Arg(command) => {
                let args = command.arguments_with_prompt(prompt);
                self.run_command(alias, command, &args, None).await
            }
            AdvisorTransport::Stdin(command) => {
                self.run_command(alias, command, command.args(), Some(prompt))
                    .await
            }
        }
    }
}

fn spawn(mut command: Command, pipe_input: bool) -> io::Result<Child> {
    command
        .stdin(if pipe_input {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
}

/// Writes `input` to the child's stdin, closes it, and waits for exit.
///
/// Writing and output collection run concurrently so a backend that fills
/// its stdout pipe before reading all input cannot deadlock.
async fn collect(mut child: Child, input: Option<&str>) -> io::Result<Output> {
    let stdin = child.stdin.take();
    let feed = async move {
        let (Some(mut pipe), Some(text)) = (stdin, input) else {
            return Ok(());
        };
        match pipe.write_all(text.as_bytes()).await {
            Ok(()) => pipe.shutdown().await,
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("advisor backend closed stdin before reading the whole prompt");
                Ok(())
            }
            Err(err) => Err(err),
        }
    };

    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    fed?;
    output
}

fn not_found_hint(
    stderr: &str,
    executable: &str,
    search_path: Option<&std::ffi::OsStr>,
) -> Option<String> {
    if !(stderr.contains("not found") || stderr.contains("No such file or directory")) {
        return None;
    }

    Some(resolve_executable(executable, search_path).map_or_else(
        || {
            format!(
                "command `{executable}` could not be resolved on PATH; use an absolute path \
                 or confirm `{executable}` runs in a terminal"
            )
        },
        |path| format!("resolved `{executable}` to {path}; confirm this process is allowed to execute it"),
    ))
}
