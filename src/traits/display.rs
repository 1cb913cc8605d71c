//! Display abstraction for the character LCD.
//!
//! This module defines the [`CharacterDisplay`] trait the filter writes
//! rendered rows through. The physical driver, refresh timing, and any
//! scrolling belong to the implementor.

/// A row-addressed character display.
///
/// Implementors provide hardware-specific output for displays like HD44780
/// character LCDs, OLED text modes, or simulated displays for testing.
///
/// # Example
///
/// ```ignore
/// use throttle_panel::traits::CharacterDisplay;
///
/// struct MyLcd { /* ... */ }
///
/// impl CharacterDisplay for MyLcd {
///     type Error = ();
///
///     fn rows(&self) -> u8 { 2 }
///     fn write_line(&mut self, row: u8, text: &str) -> Result<(), ()> {
///         // Position the cursor at `row` and write `text`
///         Ok(())
///     }
/// }
/// ```
pub trait CharacterDisplay {
    /// Error type for display operations.
    type Error;

    /// Number of addressable rows.
    fn rows(&self) -> u8;

    /// Replaces the content of `row` with `text`.
    ///
    /// Rows are zero-based. Text is normally exactly one display row wide;
    /// implementations may truncate anything longer.
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), Self::Error>;

    /// Blanks a single row.
    fn clear_line(&mut self, row: u8) -> Result<(), Self::Error> {
        self.write_line(row, "")
    }

    /// Blanks every row.
    fn clear(&mut self) -> Result<(), Self::Error> {
        for row in 0..self.rows() {
            self.clear_line(row)?;
        }
        Ok(())
    }

    /// Shows the rows written since the last call as one update.
    ///
    /// Displays that update each row as it is written need nothing here.
    fn present(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
