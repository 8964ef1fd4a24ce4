//! Built-in canned responder for stub advisors.

use crate::advisor::domain::AdvisorAlias;
use crate::council::prompt::extract_question;

/// Synthesizes the stub advisor's reply to a composed prompt.
///
/// The reply names the advisor and echoes the operator's question so that
/// a stub-backed council can be exercised end to end without any backend.
#[must_use]
pub fn stub_reply(alias: &AdvisorAlias, prompt: &str) -> String {
    let question = extract_question(prompt).unwrap_or_default();
    format!(
        "[{alias}] Settle the goal first, then the constraints, then the path to execute.\n\
         Your question: {question}"
    )
}
