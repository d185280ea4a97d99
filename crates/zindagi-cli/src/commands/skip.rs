//! `zindagi skip`: jump ahead and print the resulting state.

use anyhow::Result;

use zindagi_automaton::{Automaton, RenderOverrides};

use crate::config::Settings;

/// Execute the `zindagi skip` command.
///
/// `generations` is taken as text so that any positive number is accepted.
pub fn execute(settings: &Settings, automaton: &mut Automaton, generations: &str) -> Result<()> {
    automaton.skip_str(generations)?;

    let mut overrides = RenderOverrides::new();
    if let Some(alive) = &settings.render_alive {
        overrides = overrides.with_alive(alive.as_str());
    }
    if let Some(dead) = &settings.render_dead {
        overrides = overrides.with_dead(dead.as_str());
    }

    println!("{}", automaton.render(&overrides));
    Ok(())
}
