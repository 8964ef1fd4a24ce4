//! Given steps for council chat scenarios.

use super::world::{CouncilWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a fresh council")]
fn a_fresh_council(world: &mut CouncilWorld) -> Result<(), eyre::Report> {
    world.open_council()
}

#[given(r#"a stub advisor named "{alias}""#)]
fn a_stub_advisor(world: &mut CouncilWorld, alias: String) -> Result<(), eyre::Report> {
    run_async(world.council()?.register_advisor(&alias, "stub", Vec::new()))
        .wrap_err("register stub advisor")?;
    Ok(())
}

#[given(r#"an argument advisor named "{alias}" running "{program}""#)]
fn an_argument_advisor(
    world: &mut CouncilWorld,
    alias: String,
    program: String,
) -> Result<(), eyre::Report> {
    run_async(world.council()?.register_advisor(&alias, "arg", vec![program]))
        .wrap_err("register argument advisor")?;
    Ok(())
}
