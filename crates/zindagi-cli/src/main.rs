//! Zindagi CLI - run life-like cellular automata in the terminal.
//!
//! Runs `B3/S23` on a random 10x10 grid when invoked without a command.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;
mod render;

use commands::InitSource;
use config::Settings;
use zindagi_automaton::Algorithm;

/// Zindagi CLI - life-like cellular automata.
///
/// Rules use B/S notation (`B3/S23` is Conway's Game of Life). The initial
/// state is read from a pattern file or generated at random.
#[derive(Parser, Debug)]
#[command(
    name = "zindagi",
    author,
    version,
    about = "Zindagi: life-like cellular automata",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (JSON) to use instead of the default location.
    #[arg(long, global = true, env = "ZINDAGI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render generations until the grid stabilizes (default command).
    Run {
        #[command(flatten)]
        automaton: AutomatonArgs,

        /// Stop after this many generations.
        #[arg(short, long)]
        generations: Option<u64>,

        /// Milliseconds to hold each generation on screen.
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Advance a number of generations and print the resulting state.
    Skip {
        /// Number of generations (any positive number).
        #[arg(allow_hyphen_values = true)]
        generations: String,

        #[command(flatten)]
        automaton: AutomatonArgs,
    },

    /// Show how a rule string is parsed.
    Rule {
        /// Rule in B/S notation, e.g. `B36/S23`.
        rule: String,
    },

    /// Inspect CLI settings.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Options shared by commands that build an automaton.
#[derive(Args, Debug, Default)]
struct AutomatonArgs {
    /// Birth/survival rules in B/S notation.
    #[arg(short, long)]
    rules: Option<String>,

    /// Transition algorithm.
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Pattern file for the initial state (`-` reads stdin).
    #[arg(short, long)]
    init: Option<PathBuf>,

    /// Seed for the random initial state.
    #[arg(long, conflicts_with = "init")]
    seed: Option<u64>,

    /// Marker of a live cell in the pattern.
    #[arg(long)]
    alive: Option<String>,

    /// Marker of a dead cell in the pattern.
    #[arg(long)]
    dead: Option<String>,

    /// Separator between cells in the pattern.
    #[arg(long)]
    column_delimiter: Option<String>,

    /// Separator between rows in the pattern and the output.
    #[arg(long)]
    row_delimiter: Option<String>,

    /// Rows of the random initial state.
    #[arg(long)]
    rows: Option<usize>,

    /// Columns of the random initial state.
    #[arg(long)]
    columns: Option<usize>,

    /// Stitch opposite edges together (toroidal grid).
    #[arg(short, long)]
    stitched_edges: bool,

    /// Text rendered for live cells.
    #[arg(long)]
    render_alive: Option<String>,

    /// Text rendered for dead cells.
    #[arg(long)]
    render_dead: Option<String>,
}

impl AutomatonArgs {
    fn settings(&self) -> Settings {
        Settings {
            rules: self.rules.clone(),
            algorithm: self.algorithm,
            alive: self.alive.clone(),
            dead: self.dead.clone(),
            column_delimiter: self.column_delimiter.clone(),
            row_delimiter: self.row_delimiter.clone(),
            rows: self.rows,
            columns: self.columns,
            stitched_edges: self.stitched_edges.then_some(true),
            delay_ms: None,
            render_alive: self.render_alive.clone(),
            render_dead: self.render_dead.clone(),
        }
    }

    fn source(&self) -> InitSource<'_> {
        InitSource {
            path: self.init.as_deref(),
            seed: self.seed,
        }
    }
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective settings.
    Show,

    /// Show path to the default settings file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    // Logs go to stderr so they never mix with rendered boards.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    // Default to run if no command given
    let command = cli.command.unwrap_or(Commands::Run {
        automaton: AutomatonArgs::default(),
        generations: None,
        delay_ms: None,
    });

    match command {
        Commands::Run {
            automaton,
            generations,
            delay_ms,
        } => {
            let mut settings = settings.merge(automaton.settings());
            settings.delay_ms = delay_ms.or(settings.delay_ms);

            let mut life = commands::build_automaton(&settings, &automaton.source())?;
            commands::run::execute(&settings, &mut life, generations).await?;
        }

        Commands::Skip {
            generations,
            automaton,
        } => {
            let settings = settings.merge(automaton.settings());
            let mut life = commands::build_automaton(&settings, &automaton.source())?;
            commands::skip::execute(&settings, &mut life, &generations)?;
        }

        Commands::Rule { rule } => {
            commands::rule::execute(&rule)?;
        }

        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => {
                commands::config::show(&settings)?;
            }
            ConfigCommands::Path => {
                if let Some(path) = Settings::settings_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no settings file path available)");
                }
            }
        },
    }

    Ok(())
}
