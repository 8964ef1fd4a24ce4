//! Then steps for council chat scenarios.

use super::world::{CouncilWorld, run_async};
use council::council::{CouncilError, DispatchError, FAILURE_MARKER};
use council::history::domain::{Turn, TurnRole};
use rstest_bdd_macros::then;

fn reply_from<'a>(world: &'a CouncilWorld, alias: &str) -> Result<&'a Turn, eyre::Report> {
    world
        .last_outcome()?
        .replies
        .iter()
        .find(|turn| turn.speaker() == alias)
        .ok_or_else(|| eyre::eyre!("no reply from {alias}"))
}

#[then(r#"the operator turn reads "{text}""#)]
fn operator_turn_reads(world: &CouncilWorld, text: String) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    let operator_turns: Vec<&Turn> = outcome
        .transcript
        .iter()
        .filter(|turn| turn.role() == TurnRole::Operator)
        .collect();
    match operator_turns.as_slice() {
        [turn] if turn.text() == text => Ok(()),
        other => Err(eyre::eyre!("expected one operator turn {text:?}, got {other:?}")),
    }
}

#[then(r#"the reply from "{alias}" contains "{text}""#)]
fn reply_contains(world: &CouncilWorld, alias: String, text: String) -> Result<(), eyre::Report> {
    let reply = reply_from(world, &alias)?;
    if !reply.text().contains(&text) {
        return Err(eyre::eyre!("reply from {alias} lacks {text:?}: {:?}", reply.text()));
    }
    Ok(())
}

#[then(r#"the reply from "{alias}" starts with the failure marker"#)]
fn reply_is_failure(world: &CouncilWorld, alias: String) -> Result<(), eyre::Report> {
    let reply = reply_from(world, &alias)?;
    if !reply.text().starts_with(FAILURE_MARKER) {
        return Err(eyre::eyre!("expected failure reply, got {:?}", reply.text()));
    }
    Ok(())
}

#[then(r#"the prompt sent to "{later}" includes the reply from "{earlier}""#)]
fn prompt_includes_reply(
    world: &CouncilWorld,
    later: String,
    earlier: String,
) -> Result<(), eyre::Report> {
    let earlier_reply = reply_from(world, &earlier)?.text().to_owned();
    let prompts = world.invoker.prompts_for(&later);
    let prompt = prompts
        .last()
        .ok_or_else(|| eyre::eyre!("no prompt recorded for {later}"))?;
    if !prompt.contains(&earlier_reply) {
        return Err(eyre::eyre!(
            "prompt for {later} does not include the reply from {earlier}"
        ));
    }
    Ok(())
}

#[then("the chat is rejected for lack of a target")]
fn chat_rejected(world: &CouncilWorld) -> Result<(), eyre::Report> {
    match &world.last_chat {
        Some(Err(CouncilError::Dispatch(DispatchError::NoTarget))) => Ok(()),
        other => Err(eyre::eyre!("expected a no-target rejection, got {other:?}")),
    }
}

#[then("no turn has been recorded")]
fn no_turn_recorded(world: &CouncilWorld) -> Result<(), eyre::Report> {
    let council = world.council()?;
    let transcript = run_async(council.transcript());
    let days = run_async(council.list_dates());
    if !transcript.is_empty() || !days.is_empty() {
        return Err(eyre::eyre!(
            "expected nothing recorded, found {} turns over {} days",
            transcript.len(),
            days.len()
        ));
    }
    if !world.invoker.calls().is_empty() {
        return Err(eyre::eyre!("no advisor should have been invoked"));
    }
    Ok(())
}
