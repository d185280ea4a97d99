//! Automaton that drives generation after generation.
//!
//! The `Automaton` owns the rules, the symbols and the states. States are
//! handed out as `Arc<Grid<M>>` and replaced wholesale on every step, so a
//! snapshot obtained earlier never changes underneath its holder.

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AutomatonOptions;
use crate::engine::{Algorithm, TransitionContext};
use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::RuleSet;
use crate::state::{Grid, GridSize, Marker, RenderOverrides, Symbols, Topology};

/// Why a generation sequence stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The requested number of generations was produced.
    GenerationLimit,

    /// A step left the canonical rendering unchanged.
    Stable,
}

/// Lifecycle of a generation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// Nothing pulled yet.
    Idle,

    /// The current state has been emitted and steps may follow.
    Running,

    /// No further states will be emitted.
    Halted(HaltReason),
}

/// A life-like cellular automaton.
pub struct Automaton<M = String> {
    rules: RuleSet,
    algorithm: Algorithm,
    symbols: Symbols<M>,
    size: GridSize,
    topology: Topology,
    initial_state: Arc<Grid<M>>,
    current_state: Arc<Grid<M>>,

    /// Canonical rendering of `current_state`, filled on demand.
    rendered: OnceCell<String>,
}

impl<M: Marker + FromStr> Automaton<M> {
    /// Build an automaton from options.
    ///
    /// Dimensions are taken from the resulting initial grid: its row count
    /// and the length of its first row.
    pub fn new(options: AutomatonOptions<M>) -> AutomatonResult<Self> {
        let AutomatonOptions {
            rules,
            algorithm,
            symbols,
            init_state,
            grid,
            stitched_edges,
        } = options;

        let rules = RuleSet::from_spec(rules);
        let initial = Arc::new(Grid::from_initial(init_state, grid, &symbols)?);
        let size = initial.size();
        let topology = Topology::from_stitched_edges(stitched_edges);

        debug!(
            rules = %rules,
            size = %size,
            topology = ?topology,
            algorithm = %algorithm,
            "automaton_created"
        );

        Ok(Self {
            rules,
            algorithm,
            symbols,
            size,
            topology,
            current_state: Arc::clone(&initial),
            initial_state: initial,
            rendered: OnceCell::new(),
        })
    }
}

impl<M: Marker> Automaton<M> {
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn symbols(&self) -> &Symbols<M> {
        &self.symbols
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn columns(&self) -> usize {
        self.size.columns
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn stitched_edges(&self) -> bool {
        self.topology.is_stitched()
    }

    /// The state the automaton was built with.
    pub fn initial_state(&self) -> Arc<Grid<M>> {
        Arc::clone(&self.initial_state)
    }

    /// The latest state.
    pub fn current_state(&self) -> Arc<Grid<M>> {
        Arc::clone(&self.current_state)
    }

    /// Replace the current state.
    ///
    /// Clears the cached canonical rendering.
    pub fn set_state(&mut self, state: impl Into<Arc<Grid<M>>>) {
        self.current_state = state.into();
        self.rendered = OnceCell::new();
    }

    /// Rewind to the initial state (the same `Arc`, not a copy).
    pub fn reset(&mut self) {
        debug!("automaton_reset");
        self.set_state(Arc::clone(&self.initial_state));
    }

    /// Canonical rendering of the current state, cached until it changes.
    pub fn canonical(&self) -> &str {
        self.rendered.get_or_init(|| {
            self.current_state
                .render(&self.symbols, &RenderOverrides::default())
        })
    }

    /// Render the current state with overrides.
    ///
    /// Empty overrides return the cached canonical rendering.
    pub fn render(&self, overrides: &RenderOverrides) -> String {
        if overrides.is_empty() {
            return self.canonical().to_string();
        }
        self.current_state.render(&self.symbols, overrides)
    }

    /// Apply one transition and return the new state.
    pub fn step(&mut self) -> Arc<Grid<M>> {
        let ctx = TransitionContext {
            rules: &self.rules,
            symbols: &self.symbols,
            topology: self.topology,
            size: self.size,
        };
        let next = Arc::new(self.algorithm.next_generation(&self.current_state, &ctx));
        self.set_state(Arc::clone(&next));
        next
    }

    /// Lazily produce generations until the state stops changing.
    pub fn live(&mut self) -> Generations<'_, M> {
        Generations::new(self, None)
    }

    /// Like [`Automaton::live`], applying at most `generations` steps.
    ///
    /// The sequence yields up to `generations + 1` states: the current one
    /// first, then one per step.
    pub fn live_for(&mut self, generations: u64) -> Generations<'_, M> {
        Generations::new(self, Some(generations))
    }

    /// Advance `generations` steps (fewer if the state stabilizes) and
    /// return the resulting state.
    pub fn skip(&mut self, generations: u64) -> AutomatonResult<Arc<Grid<M>>> {
        if generations == 0 {
            return Err(AutomatonError::invalid_argument(
                "skip requires a positive number of generations",
            ));
        }
        self.live_for(generations).for_each(drop);
        Ok(self.current_state())
    }

    /// [`Automaton::skip`] with a textual count.
    ///
    /// The text must be a positive number. Fractional counts round up and
    /// `inf` runs until the state stabilizes.
    pub fn skip_str(&mut self, generations: &str) -> AutomatonResult<Arc<Grid<M>>> {
        let count: f64 = generations.trim().parse().map_err(|_| {
            AutomatonError::invalid_argument(format!(
                "skip requires a positive number, got {generations:?}"
            ))
        })?;

        if count.is_nan() || count <= 0.0 {
            return Err(AutomatonError::invalid_argument(format!(
                "skip requires a positive number, got {generations:?}"
            )));
        }

        if count.is_infinite() {
            self.live().for_each(drop);
            return Ok(self.current_state());
        }
        self.skip(count.ceil() as u64)
    }
}

impl<M: Marker> fmt::Display for Automaton<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl<M: Marker + fmt::Debug> fmt::Debug for Automaton<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("rules", &self.rules.to_string())
            .field("algorithm", &self.algorithm)
            .field("symbols", &self.symbols)
            .field("size", &self.size)
            .field("topology", &self.topology)
            .finish()
    }
}

/// Lazy sequence of generations.
///
/// The first item is the automaton's state at the time the sequence was
/// created. Each further item is the result of one step. The sequence ends
/// after the step limit or right after a step that left the canonical
/// rendering unchanged. Dropping it early is always safe.
pub struct Generations<'a, M: Marker> {
    automaton: &'a mut Automaton<M>,
    limit: Option<u64>,
    generation: u64,
    status: SimulationStatus,
}

impl<'a, M: Marker> Generations<'a, M> {
    fn new(automaton: &'a mut Automaton<M>, limit: Option<u64>) -> Self {
        Self {
            automaton,
            limit,
            generation: 0,
            status: SimulationStatus::Idle,
        }
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    /// Number of steps applied by this sequence so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn automaton(&self) -> &Automaton<M> {
        &*self.automaton
    }

    fn halt(&mut self, reason: HaltReason) {
        self.status = SimulationStatus::Halted(reason);
    }
}

impl<M: Marker> Iterator for Generations<'_, M> {
    type Item = Arc<Grid<M>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.status {
            SimulationStatus::Idle => {
                self.status = SimulationStatus::Running;
                return Some(self.automaton.current_state());
            }
            SimulationStatus::Halted(_) => return None,
            SimulationStatus::Running => {}
        }

        if self.limit.is_some_and(|limit| self.generation >= limit) {
            debug!(generation = self.generation, "automaton_generation_limit");
            self.halt(HaltReason::GenerationLimit);
            return None;
        }

        let previous = self.automaton.canonical().to_string();
        let next = self.automaton.step();
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = next.population(&self.automaton.symbols.alive),
            "automaton_step"
        );

        if self.automaton.canonical() == previous {
            info!(generation = self.generation, "automaton_stabilized");
            self.halt(HaltReason::Stable);
        }

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InitialState;

    fn dots() -> Symbols<String> {
        Symbols::new("0".to_string(), ".".to_string())
    }

    fn automaton(text: &str) -> Automaton {
        Automaton::new(
            AutomatonOptions::new(dots())
                .with_init_state(text)
                .with_grid(GridSize::new(3, 3)),
        )
        .unwrap()
    }

    const BLINKER: &str = ".....\n.....\n.000.\n.....\n.....";
    const BLOCK: &str = "....\n.00.\n.00.\n....";

    #[test]
    fn test_default_construction() {
        let automaton = Automaton::new(AutomatonOptions::default()).unwrap();

        assert_eq!(automaton.rules(), &RuleSet::conway());
        assert_eq!(automaton.size(), GridSize::new(10, 10));
        assert_eq!(automaton.algorithm(), Algorithm::Naive);
        assert!(!automaton.stitched_edges());
        assert!(Arc::ptr_eq(
            &automaton.initial_state(),
            &automaton.current_state()
        ));
    }

    #[test]
    fn test_dimensions_come_from_initial_state() {
        let automaton = automaton(BLINKER);
        assert_eq!(automaton.size(), GridSize::new(5, 5));
    }

    #[test]
    fn test_live_zero_yields_current_state_only() {
        let mut automaton = automaton(BLINKER);
        let initial = automaton.current_state();

        let states: Vec<_> = automaton.live_for(0).collect();
        assert_eq!(states.len(), 1);
        assert!(Arc::ptr_eq(&states[0], &initial));
    }

    #[test]
    fn test_live_respects_limit() {
        let mut automaton = automaton(BLINKER);
        let mut generations = automaton.live_for(3);
        assert_eq!(generations.status(), SimulationStatus::Idle);

        let states: Vec<_> = generations.by_ref().collect();
        assert_eq!(states.len(), 4);
        assert_eq!(generations.generation(), 3);
        assert_eq!(
            generations.status(),
            SimulationStatus::Halted(HaltReason::GenerationLimit)
        );
        assert_eq!(states[0], states[2]);
        assert_ne!(states[0], states[1]);
    }

    #[test]
    fn test_still_life_halts_after_one_step() {
        let mut automaton = automaton(BLOCK);
        let mut generations = automaton.live_for(10);

        assert_eq!(generations.by_ref().count(), 2);
        assert_eq!(
            generations.status(),
            SimulationStatus::Halted(HaltReason::Stable)
        );
        assert_eq!(generations.next(), None);
    }

    #[test]
    fn test_unbounded_live_stops_on_stability() {
        let mut automaton = automaton("0..\n...\n..0");
        // Two isolated cells die in one step, the empty grid is then stable.
        assert_eq!(automaton.live().count(), 3);
        assert_eq!(automaton.to_string(), "...\n...\n...");
    }

    #[test]
    fn test_skip_str_infinite_runs_until_stable() {
        for unbounded in ["inf", "Infinity", "1e400"] {
            let mut automaton = automaton("0..\n...\n..0");
            let state = automaton.skip_str(unbounded).unwrap();
            assert_eq!(state.population(&"0".to_string()), 0, "{unbounded:?}");
        }
    }

    #[test]
    fn test_yielded_snapshots_are_not_mutated() {
        let mut automaton = automaton(BLINKER);
        let states: Vec<_> = automaton.live_for(2).collect();
        let first = states[0].render(&dots(), &RenderOverrides::new());
        assert_eq!(first, BLINKER);
    }

    #[test]
    fn test_live_restarts_from_current_state() {
        let mut automaton = automaton(BLINKER);
        automaton.skip(1).unwrap();
        let current = automaton.current_state();

        let first = automaton.live_for(5).next().unwrap();
        assert!(Arc::ptr_eq(&first, &current));
    }

    #[test]
    fn test_skip_rejects_zero_without_mutation() {
        let mut automaton = automaton(BLINKER);
        let err = automaton.skip(0).unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidArgument { .. }));
        assert!(Arc::ptr_eq(
            &automaton.initial_state(),
            &automaton.current_state()
        ));
    }

    #[test]
    fn test_skip_str() {
        let mut automaton = automaton(BLINKER);
        for bad in ["0", "-2", "", "abc", "NaN"] {
            assert!(
                matches!(
                    automaton.skip_str(bad),
                    Err(AutomatonError::InvalidArgument { .. })
                ),
                "{bad:?} should be rejected"
            );
        }

        let vertical = automaton.skip_str("0.5").unwrap();
        assert_ne!(vertical.as_ref(), automaton.initial_state().as_ref());

        let back = automaton.skip_str(" 1 ").unwrap();
        assert_eq!(back.as_ref(), automaton.initial_state().as_ref());
    }

    #[test]
    fn test_reset_restores_initial_arc() {
        let mut automaton = automaton(BLINKER);
        let canonical = automaton.canonical().to_string();

        automaton.skip(3).unwrap();
        assert_ne!(automaton.canonical(), canonical);

        automaton.reset();
        assert_eq!(automaton.canonical(), canonical);
        assert!(Arc::ptr_eq(
            &automaton.initial_state(),
            &automaton.current_state()
        ));
    }

    #[test]
    fn test_set_state_invalidates_cache() {
        let mut automaton = automaton(BLOCK);
        assert_eq!(automaton.canonical(), BLOCK);

        automaton.set_state(Grid::new(vec![vec!["0".to_string()]]));
        assert_eq!(automaton.canonical(), "0");
    }

    #[test]
    fn test_render_with_overrides_is_not_cached() {
        let automaton = automaton(BLOCK);
        let overrides = RenderOverrides::new().with_alive("#").with_dead(" ");

        assert_eq!(automaton.render(&overrides), "    \n ## \n ## \n    ");
        assert_eq!(automaton.render(&RenderOverrides::new()), BLOCK);
        assert_eq!(automaton.to_string(), BLOCK);
    }

    #[test]
    fn test_structured_initial_state_is_verbatim() {
        let grid = Grid::new(vec![vec![1u8, 0], vec![0, 1]]);
        let automaton = Automaton::new(
            AutomatonOptions::new(Symbols::new(1u8, 0u8))
                .with_init_state(InitialState::Structured(grid.clone())),
        )
        .unwrap();

        assert_eq!(automaton.current_state().as_ref(), &grid);
        assert_eq!(automaton.canonical(), "10\n01");
    }
}
