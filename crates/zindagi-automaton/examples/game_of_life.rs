//! Conway's Game of Life on a toroidal grid.
//!
//! Places a few classic patterns on a stitched-edge grid and prints each
//! generation to the terminal with ANSI escape codes until the grid
//! stabilizes or the generation budget runs out.
//!
//! Run with:
//! ```bash
//! cargo run --example game_of_life -p zindagi-automaton
//! ```

use std::thread;
use std::time::Duration;

use zindagi_automaton::{
    Automaton, AutomatonOptions, Grid, GridSize, InitialState, RenderOverrides, Symbols,
};

// =============================================================================
// Pattern Setters
// =============================================================================

/// Set cells relative to an origin, ignoring those that fall off the grid.
fn stamp(cells: &mut [Vec<char>], origin: (usize, usize), pattern: &[(usize, usize)]) {
    for (dr, dc) in pattern {
        if let Some(cell) = cells
            .get_mut(origin.0 + dr)
            .and_then(|row| row.get_mut(origin.1 + dc))
        {
            *cell = '#';
        }
    }
}

/// Glider (moves diagonally):
///   .#.
///   ..#
///   ###
const GLIDER: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

/// Blinker (period-2 oscillator): ###
const BLINKER: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2)];

/// Block (still life):
///   ##
///   ##
const BLOCK: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

fn build_world(size: GridSize) -> Grid<char> {
    let mut cells = vec![vec!['.'; size.columns]; size.rows];
    stamp(&mut cells, (2, 2), GLIDER);
    stamp(&mut cells, (5, 15), GLIDER);
    stamp(&mut cells, (10, 30), BLINKER);
    stamp(&mut cells, (2, 35), BLOCK);
    Grid::new(cells)
}

// =============================================================================
// Visualization
// =============================================================================

fn print_grid(board: &str, generation: u64, population: usize) {
    // Clear screen and move cursor to top
    print!("\x1B[2J\x1B[H");

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Conway's Game of Life - Generation {}", generation);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    for line in board.lines() {
        println!("  {}", line);
    }
    println!();
    println!("  Alive cells: {}", population);
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let size = GridSize::new(20, 40);
    let max_generations = 200;
    let delay = Duration::from_millis(100);

    let symbols = Symbols::new('#', '.');
    let options = AutomatonOptions::new(symbols.clone())
        .with_init_state(InitialState::Structured(build_world(size)))
        .with_stitched_edges(true);
    let mut automaton = Automaton::new(options)?;

    let overrides = RenderOverrides::new()
        .with_alive("\x1B[92m█\x1B[0m")
        .with_dead(" ");

    let mut generations = automaton.live_for(max_generations);
    let mut generation = 0;
    for state in generations.by_ref() {
        print_grid(
            &state.render(&symbols, &overrides),
            generation,
            state.population(&symbols.alive),
        );
        generation += 1;
        thread::sleep(delay);
    }

    println!();
    println!("  ✓ Finished: {:?}", generations.status());
    Ok(())
}
