//! Paced rendering of a generation stream.
//!
//! Each state is written, held for the configured delay, then erased before
//! the next one is shown. On an interactive terminal the previous frame is
//! erased in place with ANSI cursor movement; on plain output (pipes, files)
//! frames are appended one after another.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use zindagi_automaton::{Grid, Marker, RenderOverrides, Symbols};

/// Where rendered frames go and what it can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Interactive terminal with cursor control.
    Terminal,

    /// Plain output stream.
    Console,

    /// A terminal without cursor control; nothing is rendered.
    Unsupported,
}

impl RenderTarget {
    /// Inspect stdout and `TERM`.
    pub fn detect() -> Self {
        let term = std::env::var("TERM").ok();
        Self::classify(io::stdout().is_terminal(), term.as_deref())
    }

    fn classify(is_terminal: bool, term: Option<&str>) -> Self {
        match (is_terminal, term) {
            (false, _) => Self::Console,
            (true, Some("dumb")) => Self::Unsupported,
            (true, _) => Self::Terminal,
        }
    }
}

/// Marker text and pacing used when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub alive: String,
    pub dead: String,
    pub delay: Duration,
}

/// Writes successive generations to an output stream.
pub struct Renderer<W> {
    out: W,
    target: RenderTarget,
    options: RenderOptions,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, target: RenderTarget, options: RenderOptions) -> Self {
        Self {
            out,
            target,
            options,
        }
    }

    /// Render every state of the stream, returning how many were shown.
    pub async fn render<M, I>(&mut self, states: I, symbols: &Symbols<M>) -> Result<usize>
    where
        M: Marker,
        I: IntoIterator<Item = Arc<Grid<M>>>,
    {
        if self.target == RenderTarget::Unsupported {
            warn!(
                reason = "terminal has no cursor control",
                "render_unsupported_environment"
            );
            return Ok(0);
        }

        let overrides = RenderOverrides::new()
            .with_alive(self.options.alive.clone())
            .with_dead(self.options.dead.clone());

        let mut shown = 0;
        let mut last_frame = None;
        for state in states {
            let frame = state.render(symbols, &overrides);
            self.show(&frame)?;
            shown += 1;
            debug!(frame = shown, "render_frame");

            tokio::time::sleep(self.options.delay).await;
            self.clear(&frame)?;
            last_frame = Some(frame);
        }

        // Leave the final state on screen.
        if let (RenderTarget::Terminal, Some(frame)) = (self.target, last_frame) {
            self.show(&frame)?;
        }

        Ok(shown)
    }

    /// Consume the renderer, returning the output stream.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn show(&mut self, frame: &str) -> io::Result<()> {
        writeln!(self.out, "{frame}")?;
        self.out.flush()
    }

    fn clear(&mut self, frame: &str) -> io::Result<()> {
        match self.target {
            RenderTarget::Terminal => {
                let lines = frame.lines().count().max(1);
                write!(self.out, "\x1B[{lines}A\r\x1B[J")?;
                self.out.flush()
            }
            RenderTarget::Console => writeln!(self.out),
            RenderTarget::Unsupported => Ok(()),
        }
    }
}
