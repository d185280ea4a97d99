//! `zindagi run`: render generations as they are computed.

use std::io;

use anyhow::Result;
use tracing::info;

use zindagi_automaton::Automaton;

use crate::config::Settings;
use crate::render::{RenderOptions, RenderTarget, Renderer};

/// Execute the `zindagi run` command.
///
/// Without a generation limit the run ends only when the grid stabilizes.
pub async fn execute(
    settings: &Settings,
    automaton: &mut Automaton,
    generations: Option<u64>,
) -> Result<()> {
    let symbols = automaton.symbols().clone();
    let options = RenderOptions {
        alive: settings.render_alive().to_string(),
        dead: settings.render_dead().to_string(),
        delay: settings.delay(),
    };
    let mut renderer = Renderer::new(io::stdout().lock(), RenderTarget::detect(), options);

    let shown = match generations {
        Some(limit) => renderer.render(automaton.live_for(limit), &symbols).await?,
        None => renderer.render(automaton.live(), &symbols).await?,
    };

    info!(frames = shown, "run_complete");
    Ok(())
}
