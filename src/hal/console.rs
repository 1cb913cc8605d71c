//! Terminal rendering of the character LCD for desktop runs.
//!
//! [`ConsoleLcd`] keeps a row buffer. Writes only touch the buffer; each
//! [`present`](CharacterDisplay::present) redraws the whole panel as one
//! framed block on any [`std::io::Write`]:
//!
//! ```text
//! +----------------+
//! |Controller      |
//! |       Connected|
//! +----------------+
//! ```

use crate::config::{DisplayConfig, MIN_ROWS};
use crate::format::{DisplayLine, DISPLAY_WIDTH};
use crate::traits::CharacterDisplay;
use std::io::{self, Write};

/// Character LCD simulated on a text stream.
pub struct ConsoleLcd<W: Write> {
    out: W,
    rows: Vec<DisplayLine>,
}

impl<W: Write> ConsoleLcd<W> {
    /// Creates a blank panel sized from `config`, never fewer than
    /// [`MIN_ROWS`] rows.
    pub fn new(out: W, config: &DisplayConfig) -> Self {
        let rows = config.rows.max(MIN_ROWS);
        Self {
            out,
            rows: vec![DisplayLine::blank(); usize::from(rows)],
        }
    }

    /// Current content of each row.
    pub fn rows_text(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(DisplayLine::as_str)
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> io::Result<()> {
        let border = "-".repeat(DISPLAY_WIDTH);
        writeln!(self.out, "+{border}+")?;
        for row in &self.rows {
            writeln!(self.out, "|{row}|")?;
        }
        writeln!(self.out, "+{border}+")?;
        self.out.flush()
    }
}

impl<W: Write> CharacterDisplay for ConsoleLcd<W> {
    type Error = io::Error;

    fn rows(&self) -> u8 {
        u8::try_from(self.rows.len()).unwrap_or(u8::MAX)
    }

    fn write_line(&mut self, row: u8, text: &str) -> io::Result<()> {
        let slot = self.rows.get_mut(usize::from(row)).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("no display row {row}"))
        })?;

        let visible: String = text.chars().take(DISPLAY_WIDTH).collect();
        *slot = DisplayLine::padded(&visible)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.redraw()
    }
}
