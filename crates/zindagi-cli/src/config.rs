//! CLI settings management.
//!
//! Settings are layered with increasing precedence: the JSON settings file,
//! `ZINDAGI_*` environment variables (a `.env` file is honored), then
//! command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use zindagi_automaton::{
    Algorithm, AutomatonOptions, GridSize, InitialState, RuleSpec, Symbols, DEFAULT_ALIVE,
    DEFAULT_DEAD,
};

/// Default pause between rendered generations.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Automaton and rendering settings. Unset fields fall back to the defaults
/// of the automaton crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Rule notation, e.g. `B3/S23`.
    pub rules: Option<String>,

    /// Transition algorithm tag.
    pub algorithm: Option<Algorithm>,

    /// Marker of a live cell in the initial state.
    pub alive: Option<String>,

    /// Marker of a dead cell in the initial state.
    pub dead: Option<String>,

    /// Separator between cells in the initial state.
    pub column_delimiter: Option<String>,

    /// Separator between rows in the initial state and the output.
    pub row_delimiter: Option<String>,

    /// Rows of a random initial state.
    pub rows: Option<usize>,

    /// Columns of a random initial state.
    pub columns: Option<usize>,

    /// Stitch opposite edges together.
    pub stitched_edges: Option<bool>,

    /// Milliseconds between rendered generations.
    pub delay_ms: Option<u64>,

    /// Text rendered for live cells.
    pub render_alive: Option<String>,

    /// Text rendered for dead cells.
    pub render_dead: Option<String>,
}

impl Settings {
    /// Load settings from the settings file and the environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::settings_file_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };

        Ok(file.merge(Self::from_env()?))
    }

    /// Read a JSON settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Settings taken from `ZINDAGI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok();

        let mut settings = Self {
            rules: var("ZINDAGI_RULES"),
            alive: var("ZINDAGI_ALIVE"),
            dead: var("ZINDAGI_DEAD"),
            render_alive: var("ZINDAGI_RENDER_ALIVE"),
            render_dead: var("ZINDAGI_RENDER_DEAD"),
            ..Self::default()
        };

        if let Some(algorithm) = var("ZINDAGI_ALGORITHM") {
            settings.algorithm = Some(algorithm.parse()?);
        }
        if let Some(stitched) = var("ZINDAGI_STITCHED_EDGES") {
            settings.stitched_edges = Some(matches!(
                stitched.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }
        if let Some(delay) = var("ZINDAGI_DELAY_MS") {
            settings.delay_ms = Some(
                delay
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid ZINDAGI_DELAY_MS: {delay:?}"))?,
            );
        }

        Ok(settings)
    }

    /// Overlay `other` on top of `self`; set fields of `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            rules: other.rules.or(self.rules),
            algorithm: other.algorithm.or(self.algorithm),
            alive: other.alive.or(self.alive),
            dead: other.dead.or(self.dead),
            column_delimiter: other.column_delimiter.or(self.column_delimiter),
            row_delimiter: other.row_delimiter.or(self.row_delimiter),
            rows: other.rows.or(self.rows),
            columns: other.columns.or(self.columns),
            stitched_edges: other.stitched_edges.or(self.stitched_edges),
            delay_ms: other.delay_ms.or(self.delay_ms),
            render_alive: other.render_alive.or(self.render_alive),
            render_dead: other.render_dead.or(self.render_dead),
        }
    }

    /// Markers and delimiters, each defaulted independently.
    pub fn symbols(&self) -> Symbols {
        let defaults = Symbols::default();
        Symbols {
            alive: self.alive.clone().unwrap_or(defaults.alive),
            dead: self.dead.clone().unwrap_or(defaults.dead),
            column_delimiter: self
                .column_delimiter
                .clone()
                .unwrap_or(defaults.column_delimiter),
            row_delimiter: self.row_delimiter.clone().unwrap_or(defaults.row_delimiter),
        }
    }

    pub fn grid(&self) -> GridSize {
        let defaults = GridSize::default();
        GridSize::new(
            self.rows.unwrap_or(defaults.rows),
            self.columns.unwrap_or(defaults.columns),
        )
    }

    /// Construction options for the given initial state.
    pub fn automaton_options(&self, init_state: InitialState) -> AutomatonOptions {
        let rules = self
            .rules
            .clone()
            .map_or(RuleSpec::Default, RuleSpec::Text);

        AutomatonOptions::new(self.symbols())
            .with_rules(rules)
            .with_algorithm(self.algorithm.unwrap_or_default())
            .with_init_state(init_state)
            .with_grid(self.grid())
            .with_stitched_edges(self.stitched_edges.unwrap_or(false))
    }

    pub fn delay(&self) -> Duration {
        self.delay_ms.map_or(DEFAULT_DELAY, Duration::from_millis)
    }

    /// Text rendered for live cells (black square emoji by default).
    pub fn render_alive(&self) -> &str {
        self.render_alive.as_deref().unwrap_or(DEFAULT_ALIVE)
    }

    /// Text rendered for dead cells (white square emoji by default).
    pub fn render_dead(&self) -> &str {
        self.render_dead.as_deref().unwrap_or(DEFAULT_DEAD)
    }

    /// Get the path to the default settings file.
    pub fn settings_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "zindagi", "zindagi")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_overlay() {
        let base = Settings {
            rules: Some("B36/S23".into()),
            rows: Some(4),
            delay_ms: Some(10),
            ..Settings::default()
        };
        let overlay = Settings {
            rules: Some("B3/S23".into()),
            columns: Some(7),
            ..Settings::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.rules.as_deref(), Some("B3/S23"));
        assert_eq!(merged.grid(), GridSize::new(4, 7));
        assert_eq!(merged.delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.symbols(), Symbols::default());
        assert_eq!(settings.grid(), GridSize::new(10, 10));
        assert_eq!(settings.delay(), DEFAULT_DELAY);
        assert_eq!(settings.render_alive(), DEFAULT_ALIVE);
        assert_eq!(settings.render_dead(), DEFAULT_DEAD);

        let options = settings.automaton_options(InitialState::Random);
        assert_eq!(options.rules, RuleSpec::Default);
        assert!(!options.stitched_edges);
    }

    #[test]
    fn test_partial_symbols_keep_other_defaults() {
        let settings = Settings {
            alive: Some("0".into()),
            ..Settings::default()
        };
        let symbols = settings.symbols();
        assert_eq!(symbols.alive, "0");
        assert_eq!(symbols.dead, DEFAULT_DEAD);
        assert_eq!(symbols.row_delimiter, "\n");
    }

    #[test]
    fn test_parse_settings_file() {
        let settings: Settings = serde_json::from_str(
            r#"{ "rules": "B36/S23", "algorithm": "naive", "stitched-edges": true, "delay-ms": 50 }"#,
        )
        .unwrap();

        assert_eq!(settings.rules.as_deref(), Some("B36/S23"));
        assert_eq!(settings.algorithm, Some(Algorithm::Naive));
        assert_eq!(settings.stitched_edges, Some(true));
        assert_eq!(settings.delay(), Duration::from_millis(50));
    }
}
