//! Mock implementations for testing without hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockLcd`] | [`CharacterDisplay`] | Tracks row writes and current content |
//!
//! # Example
//!
//! ```rust
//! use throttle_panel::hal::MockLcd;
//! use throttle_panel::traits::CharacterDisplay;
//!
//! let mut lcd = MockLcd::new(8);
//! lcd.write_line(1, "       Connected").unwrap();
//!
//! assert_eq!(lcd.row(1), Some("       Connected"));
//! assert_eq!(lcd.writes.len(), 1);
//! ```
//!
//! [`CharacterDisplay`]: crate::traits::CharacterDisplay

use crate::format::DISPLAY_WIDTH;
use crate::traits::CharacterDisplay;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

// ============================================================================
// Display Mocks
// ============================================================================

/// Mock character display for testing.
///
/// Records every `write_line` call in order and keeps the current content
/// of each row, and counts [`present`](CharacterDisplay::present) calls.
/// Writes to a row past [`rows`](CharacterDisplay::rows) fail
/// with `Err(())`, like a driver rejecting a bad cursor position.
#[derive(Debug, Clone, Default)]
pub struct MockLcd {
    /// Every `(row, text)` written, oldest first.
    pub writes: Vec<(u8, String)>,
    /// Current content of each row.
    pub content: Vec<String>,
    /// Number of completed updates presented.
    pub presents: usize,
    /// When set, every write fails.
    pub fail_writes: bool,
}

impl MockLcd {
    /// Creates a blank display with `rows` rows.
    pub fn new(rows: u8) -> Self {
        Self {
            writes: Vec::new(),
            content: vec![String::new(); usize::from(rows)],
            presents: 0,
            fail_writes: false,
        }
    }

    /// Makes every subsequent write fail.
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current text of `row`.
    pub fn row(&self, row: u8) -> Option<&str> {
        self.content.get(usize::from(row)).map(String::as_str)
    }

    /// Forgets recorded writes but keeps row content.
    pub fn reset_writes(&mut self) {
        self.writes.clear();
    }
}

impl CharacterDisplay for MockLcd {
    type Error = ();

    fn rows(&self) -> u8 {
        u8::try_from(self.content.len()).unwrap_or(u8::MAX)
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        let slot = self.content.get_mut(usize::from(row)).ok_or(())?;
        let visible: String = text.chars().take(DISPLAY_WIDTH).collect();
        *slot = visible.clone();
        self.writes.push((row, visible));
        Ok(())
    }

    fn present(&mut self) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.presents += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
