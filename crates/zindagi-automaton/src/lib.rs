//! Life-like cellular automata with configurable rules and topology.
//!
//! This crate generalizes Conway's Game of Life to any birth/survival rule
//! (`B3/S23`, `B36/S23`, ...) on a flat or toroidal 2D grid, and drives it
//! generation by generation with early stopping once the grid stops changing.
//!
//! ## Core Concepts
//!
//! - **RuleSet**: neighbor counts that cause a birth or allow survival
//! - **Symbols**: the markers for live and dead cells plus text delimiters
//! - **Grid**: a row-major array of markers
//! - **Automaton**: rules, symbols, the initial state and the current state
//! - **Generations**: the lazy sequence of states produced by `live`
//!
//! ## The Step Model
//!
//! ```text
//! live(n) = [current, step(current), step(step(current)), ...]
//!           stops after n steps, or right after a step whose canonical
//!           rendering equals the one before it
//! ```
//!
//! ## Example
//!
//! ```
//! use zindagi_automaton::{Automaton, AutomatonOptions, Symbols};
//!
//! let options = AutomatonOptions::new(Symbols::new('#', '.'))
//!     .with_rules("B3/S23")
//!     .with_init_state("....\n.##.\n.##.\n....");
//! let mut automaton = Automaton::new(options)?;
//!
//! // A block is a still life: the initial state plus one no-op step.
//! assert_eq!(automaton.live_for(10).count(), 2);
//! # Ok::<(), zindagi_automaton::AutomatonError>(())
//! ```

mod automaton;
pub mod config;
pub mod engine;
mod error;
mod rule;
mod state;

pub use automaton::{Automaton, Generations, HaltReason, SimulationStatus};
pub use config::AutomatonOptions;
pub use engine::{Algorithm, TransitionContext};
pub use error::{AutomatonError, AutomatonResult};
pub use rule::{RuleSet, RuleSpec};
pub use state::{
    Grid, GridSize, InitialState, Marker, RenderOverrides, Symbols, Topology, DEFAULT_ALIVE,
    DEFAULT_DEAD,
};
