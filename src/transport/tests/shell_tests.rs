//! Unit tests for shell quoting and the login-shell command builder.

use crate::transport::adapters::process::{LoginShell, shell_escape};
use rstest::rstest;
use std::ffi::OsStr;

#[rstest]
#[case("", "''")]
#[case("a b", "'a b'")]
#[case("it's", "'it'\\''s'")]
#[case("诸葛亮", "'诸葛亮'")]
#[case("$HOME; rm -rf /", "'$HOME; rm -rf /'")]
fn shell_escape_quotes_one_word(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(shell_escape(input), expected);
}

#[rstest]
fn command_runs_escaped_argv_through_shell() {
    let shell = LoginShell::new("/bin/zsh", ["-l".to_owned(), "-c".to_owned()]);

    let command = shell.command_for(["codex", "exec", "what's next?"]);
    let std_command = command.as_std();

    assert_eq!(std_command.get_program(), OsStr::new("/bin/zsh"));
    let args: Vec<&OsStr> = std_command.get_args().collect();
    assert_eq!(
        args,
        vec![
            OsStr::new("-l"),
            OsStr::new("-c"),
            OsStr::new("'codex' 'exec' 'what'\\''s next?'"),
        ]
    );
}

#[rstest]
fn default_shell_is_an_interactive_login_shell() {
    let shell = LoginShell::default();

    let command = shell.command_for(["true"]);
    let args: Vec<&OsStr> = command.as_std().get_args().collect();

    assert!(!shell.program().is_empty());
    assert_eq!(
        args,
        vec![
            OsStr::new("-l"),
            OsStr::new("-i"),
            OsStr::new("-c"),
            OsStr::new("'true'")
        ]
    );
}
