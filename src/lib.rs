//! # throttle-panel
//!
//! Character LCD panel for a DCC command station. It filters inbound status
//! messages from a handheld throttle controller and renders them as two
//! 16 column rows, using the locomotive roster for names and classes.
//!
//! ## Features
//!
//! - **Inbound filter**: claims the controller's `U` messages and reports
//!   whether each one was consumed
//! - **Roster**: identifier to label lookup with a default decoder fallback
//! - **Fixed-width layout**: every row is exactly 16 printable columns,
//!   checked at construction
//! - **Startup automation**: declared power-up and display-clearing sequences
//!
//! ## Architecture
//!
//! - `format` - Fixed-width display rows and identifier rendering
//! - `roster` - Locomotive roster and the process-wide table
//! - `inbound` - Parsed inbound messages
//! - `filter` - Message filter and row rendering
//! - `automation` - Declared startup sequences
//! - `traits` - Display abstraction
//! - `hal` - Display implementations (mock for testing, console for desktop)
//!
//! ## Example
//!
//! ```rust
//! use throttle_panel::{hal::MockLcd, InboundEvent, InboundFilter, Roster};
//!
//! let roster = Roster::layout().unwrap();
//! let filter = InboundFilter::new(&roster);
//! let mut lcd = MockLcd::new(8);
//!
//! let event = InboundEvent::parse("<U 0 1>").unwrap();
//! let verdict = filter.dispatch(&event, &mut lcd).unwrap();
//!
//! assert!(verdict.is_handled());
//! assert_eq!(lcd.row(0), Some("Controller      "));
//! assert_eq!(lcd.row(1), Some("       Connected"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Declared startup automation sequences.
pub mod automation;
/// Shared configuration for the panel.
pub mod config;
/// Inbound message filter and row rendering.
pub mod filter;
/// Fixed-width display rows.
pub mod format;
/// Display implementations (mock for testing, console for desktop).
pub mod hal;
/// Parsed inbound command station messages.
pub mod inbound;
/// Locomotive roster.
pub mod roster;
/// Display abstraction.
pub mod traits;

/// Roster document types (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

// Re-exports for convenience
pub use automation::{AutomationError, Sequence, Step, Trigger, STARTUP};
pub use filter::{DeclineReason, InboundFilter, PotDirection, UCommand, Verdict};
pub use format::{format_loco_id, DisplayLine, FormatError, DISPLAY_WIDTH};
pub use inbound::InboundEvent;
pub use roster::{FunctionSlot, Roster, RosterEntry, RosterError, RosterLabel};
pub use traits::CharacterDisplay;

// Config re-exports
pub use config::{Config, DeviceConfig, DisplayConfig, FilterConfig};

// Message re-exports (for roster documents)
#[cfg(feature = "serde")]
pub use messages::{RosterDocument, RosterRecord};

#[cfg(feature = "serde-json-core")]
pub use messages::{parse_roster_document, parse_roster_record};
