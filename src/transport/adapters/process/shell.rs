//! Login-shell fallback for executables missing from the inherited `PATH`.

use tokio::process::Command;

/// Shell used to re-run a command when direct resolution fails.
///
/// The shell receives `args` followed by one command string, so with the
/// defaults a command runs as `$SHELL -l -i -c '<command>'` and picks up
/// `PATH` changes made in the operator's shell profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginShell {
    program: String,
    args: Vec<String>,
}

impl LoginShell {
    /// Creates a shell from a program and the arguments placed before the
    /// command string.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Returns the shell program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds a command running `argv` through the shell.
    pub(crate) fn command_for<'a>(&self, argv: impl IntoIterator<Item = &'a str>) -> Command {
        let line = argv
            .into_iter()
            .map(shell_escape)
            .collect::<Vec<_>>()
            .join(" ");
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(line);
        command
    }
}

impl Default for LoginShell {
    fn default() -> Self {
        let program = std::env::var("SHELL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "/bin/sh".to_owned());
        Self::new(program, ["-l", "-i", "-c"].map(str::to_owned))
    }
}

/// Quotes a value for safe use as one POSIX shell word.
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}
