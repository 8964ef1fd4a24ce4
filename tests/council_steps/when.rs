//! When steps for council chat scenarios.

use super::world::{CouncilWorld, run_async};
use council::council::DispatchMode;
use rstest_bdd_macros::when;

#[when(r#"the operator says "{text}""#)]
fn the_operator_says(world: &mut CouncilWorld, text: String) -> Result<(), eyre::Report> {
    let result = run_async(world.council()?.chat(&text, DispatchMode::Mention));
    world.last_chat = Some(result);
    Ok(())
}

#[when(r#"the operator broadcasts "{text}""#)]
fn the_operator_broadcasts(world: &mut CouncilWorld, text: String) -> Result<(), eyre::Report> {
    let result = run_async(world.council()?.chat(&text, DispatchMode::Broadcast));
    world.last_chat = Some(result);
    Ok(())
}
