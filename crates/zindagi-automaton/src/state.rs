//! Grid state: cell markers, topology-aware lookup, parsing and rendering.
//!
//! A grid is a row-major `Vec<Vec<M>>` of markers. Which marker means
//! "alive" is not part of the grid; it comes from the [`Symbols`] of the
//! automaton that owns it.
//!
//! ```text
//! Symbols  = { alive, dead, column_delimiter, row_delimiter }
//! Grid<M>  = [[M; columns]; rows]
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};

/// Default alive marker (black square emoji).
pub const DEFAULT_ALIVE: &str = "\u{2B1B}\u{FE0F}";

/// Default dead marker (white square emoji).
pub const DEFAULT_DEAD: &str = "\u{2B1C}\u{FE0F}";

/// A value usable as a cell marker.
///
/// Markers only need equality (to tell alive from dead) and a textual form
/// (for rendering). Strings, chars and integers all qualify.
pub trait Marker: Clone + PartialEq + fmt::Display {}

impl<T> Marker for T where T: Clone + PartialEq + fmt::Display {}

/// Marker and delimiter configuration used to read and render grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbols<M = String> {
    /// Marker of a live cell.
    pub alive: M,

    /// Marker of a dead cell.
    pub dead: M,

    /// Separator between cells of a row in textual input.
    #[serde(default)]
    pub column_delimiter: String,

    /// Separator between rows, in textual input and rendered output.
    #[serde(default = "default_row_delimiter")]
    pub row_delimiter: String,
}

fn default_row_delimiter() -> String {
    "\n".to_string()
}

impl<M> Symbols<M> {
    /// Create symbols with the given markers and default delimiters.
    pub fn new(alive: M, dead: M) -> Self {
        Self {
            alive,
            dead,
            column_delimiter: String::new(),
            row_delimiter: default_row_delimiter(),
        }
    }

    pub fn with_column_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.column_delimiter = delimiter.into();
        self
    }

    pub fn with_row_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.row_delimiter = delimiter.into();
        self
    }
}

impl Default for Symbols<String> {
    fn default() -> Self {
        Self::new(DEFAULT_ALIVE.to_string(), DEFAULT_DEAD.to_string())
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

impl GridSize {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// How coordinates outside the grid are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Cells beyond the edges are permanently dead.
    #[default]
    Flat,

    /// Opposite edges are stitched together (a torus).
    Toroidal,
}

impl Topology {
    pub fn from_stitched_edges(stitched: bool) -> Self {
        if stitched {
            Self::Toroidal
        } else {
            Self::Flat
        }
    }

    pub fn is_stitched(self) -> bool {
        self == Self::Toroidal
    }

    /// Map a possibly out-of-range coordinate to a grid index.
    ///
    /// Returns `None` when the coordinate falls off a flat grid or the grid
    /// has a zero dimension.
    pub fn resolve(self, row: isize, column: isize, size: GridSize) -> Option<(usize, usize)> {
        match self {
            Self::Flat => Some((usize::try_from(row).ok()?, usize::try_from(column).ok()?)),
            Self::Toroidal => Some((wrap(row, size.rows)?, wrap(column, size.columns)?)),
        }
    }
}

/// Replace marker text with its override, alive first and then dead.
fn substitute_markers<M: Marker>(
    mut text: String,
    symbols: &Symbols<M>,
    overrides: &RenderOverrides,
) -> String {
    for (marker, replacement) in [
        (&symbols.alive, overrides.alive.as_deref()),
        (&symbols.dead, overrides.dead.as_deref()),
    ] {
        let Some(replacement) = replacement else {
            continue;
        };
        let marker = marker.to_string();
        if !marker.is_empty() && marker != replacement {
            text = text.replace(&marker, replacement);
        }
    }
    text
}

fn wrap(coord: isize, dimension: usize) -> Option<usize> {
    let dimension = isize::try_from(dimension).ok().filter(|d| *d > 0)?;
    Some(coord.rem_euclid(dimension) as usize)
}

/// Per-call overrides applied when rendering a grid to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOverrides {
    /// Text substituted for every occurrence of the alive marker.
    pub alive: Option<String>,

    /// Text substituted for every occurrence of the dead marker.
    pub dead: Option<String>,

    /// Separator placed between cells (none by default).
    pub column_delimiter: Option<String>,

    /// Separator placed between rows (the symbols' row delimiter by default).
    pub row_delimiter: Option<String>,
}

impl RenderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alive(mut self, alive: impl Into<String>) -> Self {
        self.alive = Some(alive.into());
        self
    }

    pub fn with_dead(mut self, dead: impl Into<String>) -> Self {
        self.dead = Some(dead.into());
        self
    }

    pub fn with_column_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.column_delimiter = Some(delimiter.into());
        self
    }

    pub fn with_row_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.row_delimiter = Some(delimiter.into());
        self
    }

    /// Whether rendering with these overrides equals the canonical rendering.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// How the initial state of an automaton is specified.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialState<M = String> {
    /// Text split by the symbols' row and column delimiters.
    Text(String),

    /// A grid used verbatim.
    Structured(Grid<M>),

    /// A uniformly random grid of the configured size.
    #[default]
    Random,
}

impl<M> From<Grid<M>> for InitialState<M> {
    fn from(grid: Grid<M>) -> Self {
        Self::Structured(grid)
    }
}

impl<M> From<&str> for InitialState<M> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A rectangular grid of cell markers, row-major.
///
/// Rows are not required to share a length. Lookups of missing cells
/// return `None` and read as dead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid<M = String> {
    cells: Vec<Vec<M>>,
}

impl<M> Grid<M> {
    pub fn new(cells: Vec<Vec<M>>) -> Self {
        Self { cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Length of the first row (zero for an empty grid).
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows(), self.columns())
    }

    pub fn cells(&self) -> &[Vec<M>] {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&M> {
        self.cells.get(row)?.get(column)
    }

    pub fn into_cells(self) -> Vec<Vec<M>> {
        self.cells
    }
}

impl<M: Marker> Grid<M> {
    /// Whether the cell at a signed coordinate holds the alive marker.
    ///
    /// Toroidal lookups wrap modulo `size`, the automaton's fixed dimensions.
    pub fn is_alive(
        &self,
        row: isize,
        column: isize,
        size: GridSize,
        topology: Topology,
        alive: &M,
    ) -> bool {
        topology
            .resolve(row, column, size)
            .and_then(|(r, c)| self.get(r, c))
            .is_some_and(|cell| cell == alive)
    }

    /// Number of cells holding the alive marker.
    pub fn population(&self, alive: &M) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| *cell == alive)
            .count()
    }

    /// Render the grid as text.
    ///
    /// Cells are joined with no separator and rows with the symbols' row
    /// delimiter, unless overridden. Marker overrides are literal, global
    /// substitutions on the assembled text, alive first and then dead. With an
    /// overridden column delimiter the substitution runs on each cell instead,
    /// so delimiter text is never rewritten.
    pub fn render(&self, symbols: &Symbols<M>, overrides: &RenderOverrides) -> String {
        let row_delimiter = overrides
            .row_delimiter
            .as_deref()
            .unwrap_or(&symbols.row_delimiter);

        let Some(column_delimiter) = overrides.column_delimiter.as_deref() else {
            let board = self
                .cells
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect::<String>())
                .collect::<Vec<_>>()
                .join(row_delimiter);
            return substitute_markers(board, symbols, overrides);
        };

        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| substitute_markers(cell.to_string(), symbols, overrides))
                    .collect::<Vec<_>>()
                    .join(column_delimiter)
            })
            .collect::<Vec<_>>()
            .join(row_delimiter)
    }

    /// A `rows x columns` grid where each cell is alive with probability 1/2.
    pub fn random(size: GridSize, symbols: &Symbols<M>) -> Self {
        Self::random_with(&mut rand::rng(), size, symbols)
    }

    /// Like [`Grid::random`] with an explicit random source.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, size: GridSize, symbols: &Symbols<M>) -> Self {
        let cells = (0..size.rows)
            .map(|_| {
                (0..size.columns)
                    .map(|_| {
                        if rng.random_bool(0.5) {
                            symbols.alive.clone()
                        } else {
                            symbols.dead.clone()
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(cells)
    }
}

impl<M: Marker + FromStr> Grid<M> {
    /// Build the initial grid from its specification.
    pub fn from_initial(
        init: InitialState<M>,
        size: GridSize,
        symbols: &Symbols<M>,
    ) -> AutomatonResult<Self> {
        match init {
            InitialState::Structured(grid) => Ok(grid),
            InitialState::Text(text) => Self::parse(&text, symbols),
            InitialState::Random => Ok(Self::random(size, symbols)),
        }
    }

    /// Parse a textual grid.
    ///
    /// The text is trimmed, split into rows by the row delimiter, each row is
    /// trimmed and split into cells by the column delimiter. Cell values are
    /// not checked against the markers. With an empty column delimiter a row
    /// is read one marker at a time, falling back to single characters.
    pub fn parse(text: &str, symbols: &Symbols<M>) -> AutomatonResult<Self> {
        let markers = [symbols.alive.to_string(), symbols.dead.to_string()];
        let text = text.trim();
        let rows: Vec<&str> = if symbols.row_delimiter.is_empty() {
            vec![text]
        } else {
            text.split(symbols.row_delimiter.as_str()).collect()
        };

        let cells = rows
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                split_cells(line.trim(), &symbols.column_delimiter, &markers)
                    .into_iter()
                    .enumerate()
                    .map(|(column, token)| {
                        token.parse::<M>().map_err(|_| AutomatonError::InvalidCell {
                            token: token.to_string(),
                            row,
                            column,
                        })
                    })
                    .collect::<AutomatonResult<Vec<M>>>()
            })
            .collect::<AutomatonResult<Vec<_>>>()?;

        Ok(Self::new(cells))
    }
}

fn split_cells<'a>(row: &'a str, delimiter: &str, markers: &[String]) -> Vec<&'a str> {
    if !delimiter.is_empty() {
        return row.split(delimiter).collect();
    }

    let mut cells = Vec::new();
    let mut rest = row;
    while let Some(first) = rest.chars().next() {
        let len = markers
            .iter()
            .filter(|marker| !marker.is_empty() && rest.starts_with(marker.as_str()))
            .map(String::len)
            .max()
            .unwrap_or(first.len_utf8());
        let (cell, tail) = rest.split_at(len);
        cells.push(cell);
        rest = tail;
    }
    cells
}

impl<M> From<Vec<Vec<M>>> for Grid<M> {
    fn from(cells: Vec<Vec<M>>) -> Self {
        Self::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dots() -> Symbols<String> {
        Symbols::new("0".to_string(), ".".to_string())
    }

    fn grid(rows: &[&str]) -> Grid<String> {
        Grid::new(
            rows.iter()
                .map(|row| row.chars().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_default_symbols() {
        let symbols = Symbols::default();
        assert_eq!(symbols.alive, DEFAULT_ALIVE);
        assert_eq!(symbols.dead, DEFAULT_DEAD);
        assert_eq!(symbols.column_delimiter, "");
        assert_eq!(symbols.row_delimiter, "\n");
    }

    #[test]
    fn test_parse_trims_whole_text_and_rows() {
        let text = "\n   .0.\n      ..0  \n   000\n";
        let parsed = Grid::parse(text, &dots()).unwrap();
        assert_eq!(parsed, grid(&[".0.", "..0", "000"]));
        assert_eq!(parsed.size(), GridSize::new(3, 3));
    }

    #[test]
    fn test_parse_with_delimiters() {
        let symbols = Symbols::new("x".to_string(), "o".to_string())
            .with_column_delimiter(",")
            .with_row_delimiter(";");
        let parsed = Grid::parse("x,o ; o,x", &symbols).unwrap();
        assert_eq!(parsed, grid(&["xo", "ox"]));
    }

    #[test]
    fn test_parse_keeps_multi_codepoint_markers() {
        let symbols = Symbols::default();
        let text = format!("{DEFAULT_ALIVE}{DEFAULT_DEAD}\n{DEFAULT_DEAD}{DEFAULT_ALIVE}");
        let parsed = Grid::parse(&text, &symbols).unwrap();
        assert_eq!(parsed.size(), GridSize::new(2, 2));
        assert_eq!(parsed.population(&symbols.alive), 2);
    }

    #[test]
    fn test_parse_non_string_markers() {
        let symbols = Symbols::new(1u8, 0u8).with_column_delimiter(" ");
        let parsed = Grid::<u8>::parse("1 0\n0 1", &symbols).unwrap();
        assert_eq!(parsed, Grid::new(vec![vec![1, 0], vec![0, 1]]));

        let err = Grid::<u8>::parse("1 x", &symbols).unwrap_err();
        assert!(matches!(
            err,
            AutomatonError::InvalidCell { row: 0, column: 1, .. }
        ));
    }

    #[test]
    fn test_flat_lookup_out_of_bounds_is_dead() {
        let g = grid(&["00", "00"]);
        let alive = "0".to_string();
        let size = g.size();
        assert!(g.is_alive(0, 0, size, Topology::Flat, &alive));
        assert!(!g.is_alive(-1, 0, size, Topology::Flat, &alive));
        assert!(!g.is_alive(0, 2, size, Topology::Flat, &alive));
        assert!(!g.is_alive(2, 1, size, Topology::Flat, &alive));
    }

    #[test]
    fn test_toroidal_lookup_wraps() {
        let g = grid(&["0..", "...", "..0"]);
        let alive = "0".to_string();
        let size = g.size();
        assert!(g.is_alive(-1, -1, size, Topology::Toroidal, &alive));
        assert!(g.is_alive(3, 3, size, Topology::Toroidal, &alive));
        assert!(!g.is_alive(-1, 0, size, Topology::Toroidal, &alive));
    }

    #[test]
    fn test_ragged_rows_read_dead() {
        let g = grid(&["000", "0"]);
        let alive = "0".to_string();
        assert!(!g.is_alive(1, 2, g.size(), Topology::Flat, &alive));
        assert!(!g.is_alive(1, 2, g.size(), Topology::Toroidal, &alive));
    }

    #[test]
    fn test_empty_grid_lookup() {
        let g: Grid<String> = Grid::new(vec![]);
        assert!(!g.is_alive(-1, -1, g.size(), Topology::Toroidal, &"0".to_string()));
    }

    #[test]
    fn test_render_default() {
        let g = grid(&["0.", ".0"]);
        assert_eq!(g.render(&dots(), &RenderOverrides::new()), "0.\n.0");
    }

    #[test]
    fn test_render_overrides() {
        let g = grid(&["0.", ".0"]);
        let overrides = RenderOverrides::new()
            .with_alive("1")
            .with_dead("0")
            .with_column_delimiter(" ")
            .with_row_delimiter("\t");
        assert_eq!(g.render(&dots(), &overrides), "1 0\t0 1");
    }

    #[test]
    fn test_render_keeps_column_delimiter_matching_a_marker() {
        let g = grid(&["0..", "..0"]);
        let overrides = RenderOverrides::new()
            .with_dead("_")
            .with_column_delimiter(".");
        assert_eq!(g.render(&dots(), &overrides), "0._._\n_._.0");
    }

    #[test]
    fn test_render_substitutes_metacharacter_markers_literally() {
        let symbols = Symbols::new("$.".to_string(), "(*)".to_string());
        let g = Grid::new(vec![
            vec!["$.".to_string(), "(*)".to_string()],
            vec!["(*)".to_string(), "$.".to_string()],
        ]);
        let overrides = RenderOverrides::new().with_alive("#").with_dead("_");
        assert_eq!(g.render(&symbols, &overrides), "#_\n_#");
    }

    #[test]
    fn test_render_non_string_markers() {
        let symbols = Symbols::new('#', ' ');
        let g = Grid::new(vec![vec!['#', ' '], vec![' ', '#']]);
        assert_eq!(g.render(&symbols, &RenderOverrides::new()), "# \n #");
    }

    #[test]
    fn test_random_grid_shape_and_markers() {
        let symbols = dots();
        let mut rng = StdRng::seed_from_u64(7);
        let g = Grid::random_with(&mut rng, GridSize::new(4, 6), &symbols);
        assert_eq!(g.size(), GridSize::new(4, 6));
        assert!(g
            .cells()
            .iter()
            .flatten()
            .all(|cell| *cell == symbols.alive || *cell == symbols.dead));
    }

    #[test]
    fn test_from_initial_variants() {
        let symbols = dots();
        let size = GridSize::new(3, 5);

        let random = Grid::from_initial(InitialState::Random, size, &symbols).unwrap();
        assert_eq!(random.size(), size);

        let text = Grid::from_initial("0.\n.0".into(), size, &symbols).unwrap();
        assert_eq!(text, grid(&["0.", ".0"]));

        let structured = grid(&["000"]);
        let verbatim = Grid::from_initial(structured.clone().into(), size, &symbols).unwrap();
        assert_eq!(verbatim, structured);
    }
}
