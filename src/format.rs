//! Fixed-width text for a 16 column character display.
//!
//! Every line sent to the panel is exactly [`DISPLAY_WIDTH`] printable ASCII
//! characters. [`DisplayLine`] enforces that at construction, so anything
//! downstream (the display driver, column overlays) can index by column
//! without re-checking bounds.
//!
//! # Example
//!
//! ```rust
//! use throttle_panel::format::{format_loco_id, DisplayLine};
//!
//! let mut line = DisplayLine::blank();
//! line.overlay(0, &format_loco_id(84).unwrap()).unwrap();
//! line.overlay(10, "4-6-2 ").unwrap();
//! assert_eq!(line.as_str(), "0084      4-6-2 ");
//! ```

use core::fmt::{self, Write};
use heapless::String as HString;
use thiserror::Error;

/// Number of character columns on the panel.
pub const DISPLAY_WIDTH: usize = 16;

/// Columns used by a rendered locomotive identifier.
pub const ID_WIDTH: usize = 4;

/// Largest identifier that fits in [`ID_WIDTH`] columns.
pub const MAX_DISPLAY_ID: i16 = 9999;

/// Backing storage for a single display row.
pub type LineBuf = HString<DISPLAY_WIDTH>;

/// Rendered locomotive identifier (always [`ID_WIDTH`] digits).
pub type IdText = HString<ID_WIDTH>;

/// Text that cannot be laid out in the fixed column grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatError {
    /// Identifier is negative or needs more than four digits.
    #[error("identifier {0} does not fit in four columns")]
    IdentifierOverflow(i16),

    /// Text is wider than the space reserved for it.
    #[error("text of {len} characters exceeds {max} columns")]
    TextOverflow {
        /// Characters supplied.
        len: usize,
        /// Columns available.
        max: usize,
    },

    /// Text contains something other than printable ASCII.
    #[error("text contains characters the display cannot show")]
    NotAscii,

    /// A fixed template is not exactly one display row wide.
    #[error("template must be exactly {expected} columns, got {actual}")]
    TemplateWidth {
        /// Required width.
        expected: usize,
        /// Width of the template.
        actual: usize,
    },
}

/// Returns `true` if every byte is printable ASCII (space through `~`).
pub fn is_printable(text: &str) -> bool {
    text.bytes().all(|b| (b' '..=b'~').contains(&b))
}

/// Checks that `text` is printable and at most `max` columns wide.
pub fn check_width(text: &str, max: usize) -> Result<(), FormatError> {
    if !is_printable(text) {
        return Err(FormatError::NotAscii);
    }
    if text.len() > max {
        return Err(FormatError::TextOverflow {
            len: text.len(),
            max,
        });
    }
    Ok(())
}

/// Renders a locomotive identifier as four zero-padded digits.
///
/// Identifiers outside `0..=9999` are rejected rather than widened, since
/// a fifth digit would push into the columns reserved for other fields.
///
/// ```rust
/// use throttle_panel::format::{format_loco_id, FormatError};
///
/// assert_eq!(format_loco_id(3).unwrap().as_str(), "0003");
/// assert_eq!(format_loco_id(3986).unwrap().as_str(), "3986");
/// assert_eq!(format_loco_id(10239), Err(FormatError::IdentifierOverflow(10239)));
/// ```
pub fn format_loco_id(id: i16) -> Result<IdText, FormatError> {
    if !(0..=MAX_DISPLAY_ID).contains(&id) {
        return Err(FormatError::IdentifierOverflow(id));
    }
    let mut out = IdText::new();
    write!(out, "{:04}", id).map_err(|_| FormatError::IdentifierOverflow(id))?;
    Ok(out)
}

/// One full row of display text.
///
/// Always exactly [`DISPLAY_WIDTH`] printable ASCII characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplayLine(LineBuf);

impl DisplayLine {
    /// A row of spaces.
    pub fn blank() -> Self {
        let mut buf = LineBuf::new();
        for _ in 0..DISPLAY_WIDTH {
            let _ = buf.push(' ');
        }
        Self(buf)
    }

    /// Builds a line from a fixed template that must be exactly one row wide.
    pub fn template(text: &str) -> Result<Self, FormatError> {
        if !is_printable(text) {
            return Err(FormatError::NotAscii);
        }
        if text.len() != DISPLAY_WIDTH {
            return Err(FormatError::TemplateWidth {
                expected: DISPLAY_WIDTH,
                actual: text.len(),
            });
        }
        Self::padded(text)
    }

    /// Builds a line from `text`, right-padding with spaces.
    pub fn padded(text: &str) -> Result<Self, FormatError> {
        let mut line = Self::blank();
        line.overlay(0, text)?;
        Ok(line)
    }

    /// Writes `text` starting at `column`, leaving other columns untouched.
    ///
    /// Fails without modifying the line if the text would run past the
    /// last column.
    pub fn overlay(&mut self, column: usize, text: &str) -> Result<(), FormatError> {
        check_width(text, DISPLAY_WIDTH.saturating_sub(column))?;

        let end = column + text.len();
        let mut next = LineBuf::new();
        for (i, current) in self.0.bytes().enumerate() {
            let byte = if (column..end).contains(&i) {
                text.as_bytes()[i - column]
            } else {
                current
            };
            let _ = next.push(char::from(byte));
        }
        self.0 = next;
        Ok(())
    }

    /// The line's text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Characters in `[start, start + len)`, clamped to the row.
    pub fn columns(&self, start: usize, len: usize) -> &str {
        let start = start.min(DISPLAY_WIDTH);
        let end = start.saturating_add(len).min(DISPLAY_WIDTH);
        &self.0.as_str()[start..end]
    }
}

impl Default for DisplayLine {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DisplayLine {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
