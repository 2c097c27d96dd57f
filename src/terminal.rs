//! Terminal probing using crossterm

use crossterm::terminal;
use log::debug;

/// Width assumed when nothing better is known
pub const FALLBACK_WIDTH: usize = 80;

/// Size of the terminal attached to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    /// Terminal width in columns
    cols: usize,
}

impl Terminal {
    /// Ask the terminal for its size
    ///
    /// Falls back to `$COLUMNS`, then to `FALLBACK_WIDTH`, when output is
    /// not a terminal.
    pub fn probe() -> Self {
        let queried = match terminal::size() {
            Ok((cols, _)) => Some(usize::from(cols)),
            Err(e) => {
                debug!("terminal size unavailable: {e}");
                None
            }
        };
        let columns = std::env::var("COLUMNS").ok();
        Self::from_sources(queried, columns.as_deref())
    }

    fn from_sources(queried: Option<usize>, columns: Option<&str>) -> Self {
        let cols = queried
            .filter(|&cols| cols > 0)
            .or_else(|| columns.and_then(|c| c.trim().parse().ok()).filter(|&cols| cols > 0))
            .unwrap_or(FALLBACK_WIDTH);
        Self { cols }
    }

    /// Get terminal width
    pub fn cols(&self) -> usize {
        self.cols
    }
}
