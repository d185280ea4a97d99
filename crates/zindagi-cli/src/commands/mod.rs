//! CLI command implementations.

pub mod config;
pub mod rule;
pub mod run;
pub mod skip;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use zindagi_automaton::{Automaton, Grid, InitialState};

use crate::config::Settings;

/// Where the initial state comes from.
#[derive(Debug, Clone, Default)]
pub struct InitSource<'a> {
    /// Pattern file, or `-` for stdin.
    pub path: Option<&'a Path>,

    /// Seed for a reproducible random state.
    pub seed: Option<u64>,
}

/// Build an automaton from settings and an initial state source.
pub fn build_automaton(settings: &Settings, source: &InitSource<'_>) -> Result<Automaton> {
    let init_state = match (source.path, source.seed) {
        (Some(path), _) => InitialState::Text(read_pattern(path)?),
        (None, Some(seed)) => {
            let mut rng = StdRng::seed_from_u64(seed);
            InitialState::Structured(Grid::random_with(
                &mut rng,
                settings.grid(),
                &settings.symbols(),
            ))
        }
        (None, None) => InitialState::Random,
    };

    let automaton = Automaton::new(settings.automaton_options(init_state))?;
    info!(
        rules = %automaton.rules(),
        size = %automaton.size(),
        stitched_edges = automaton.stitched_edges(),
        "automaton_ready"
    );
    Ok(automaton)
}

fn read_pattern(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read pattern from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern from {}", path.display()))
}
