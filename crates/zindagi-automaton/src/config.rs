//! Construction options for an automaton.

use serde::{Deserialize, Serialize};

use crate::engine::Algorithm;
use crate::rule::RuleSpec;
use crate::state::{GridSize, InitialState, Symbols};

/// Options accepted by [`Automaton::new`](crate::Automaton::new).
///
/// Every field has a default: Conway's rule, the naive algorithm, emoji
/// markers, a random 10x10 initial state and a flat topology. Missing fields
/// deserialize to the same defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: Deserialize<'de>, Symbols<M>: Default"
))]
pub struct AutomatonOptions<M = String> {
    /// Birth/survival rules.
    #[serde(default)]
    pub rules: RuleSpec,

    /// Transition algorithm.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Markers and delimiters.
    #[serde(default)]
    pub symbols: Symbols<M>,

    /// Initial state specification.
    #[serde(default = "random_init_state")]
    pub init_state: InitialState<M>,

    /// Dimensions used when the initial state is random.
    #[serde(default)]
    pub grid: GridSize,

    /// Stitch opposite edges together (toroidal topology).
    #[serde(default)]
    pub stitched_edges: bool,
}

fn random_init_state<M>() -> InitialState<M> {
    InitialState::Random
}

impl Default for AutomatonOptions<String> {
    fn default() -> Self {
        Self::new(Symbols::default())
    }
}

impl<M> AutomatonOptions<M> {
    /// Default options around the given symbols.
    pub fn new(symbols: Symbols<M>) -> Self {
        Self {
            rules: RuleSpec::Default,
            algorithm: Algorithm::default(),
            symbols,
            init_state: InitialState::Random,
            grid: GridSize::default(),
            stitched_edges: false,
        }
    }

    pub fn with_rules(mut self, rules: impl Into<RuleSpec>) -> Self {
        self.rules = rules.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_symbols(mut self, symbols: Symbols<M>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_init_state(mut self, init_state: impl Into<InitialState<M>>) -> Self {
        self.init_state = init_state.into();
        self
    }

    pub fn with_grid(mut self, grid: GridSize) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_stitched_edges(mut self, stitched: bool) -> Self {
        self.stitched_edges = stitched;
        self
    }
}
