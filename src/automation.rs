//! Startup automation declared for the command station.
//!
//! The panel only declares these sequences. Executing them (timing, power
//! switching, looping) belongs to the command station's automation engine.
//! [`validate`] checks the declaration before it is handed over: every
//! `FOLLOW` must name a declared sequence and every LCD text must fit a row.
//!
//! ```rust
//! use throttle_panel::automation::{self, Step, Trigger, STARTUP};
//!
//! automation::validate(&STARTUP).unwrap();
//! assert_eq!(STARTUP[0].trigger, Trigger::Autostart);
//! assert_eq!(STARTUP[0].steps.last(), Some(&Step::Follow(1)));
//! ```

use crate::format::{check_width, FormatError, DISPLAY_WIDTH};
use core::fmt;
use thiserror::Error;

/// Output mode of a track district.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackMode {
    /// Main line operation.
    Main,
    /// Programming track.
    Prog,
}

/// A track district, `A` through `H` on the command station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track(pub char);

/// One automation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// `SET_TRACK(track, mode)`
    SetTrack {
        /// District to configure.
        track: Track,
        /// Mode to put it in.
        mode: TrackMode,
    },
    /// `SET_POWER(track, ON|OFF)`
    SetPower {
        /// District to switch.
        track: Track,
        /// Whether power goes on.
        on: bool,
    },
    /// `LCD(row, "text")`
    Lcd {
        /// Display row. Rows past the physical display scroll.
        row: u8,
        /// Text for the row; empty clears it.
        text: &'static str,
    },
    /// `DELAY(ms)`
    Delay(u32),
    /// `FOLLOW(sequence)`: continue with another sequence.
    Follow(u16),
}

/// What starts a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Runs once at power-up.
    Autostart,
    /// `SEQUENCE(n)`, reached through `FOLLOW(n)`.
    Sequence(u16),
}

/// A declared sequence of steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    /// How the sequence is entered.
    pub trigger: Trigger,
    /// Steps in order.
    pub steps: &'static [Step],
}

impl Sequence {
    /// The sequence number, or `None` for the autostart block.
    pub fn number(&self) -> Option<u16> {
        match self.trigger {
            Trigger::Autostart => None,
            Trigger::Sequence(n) => Some(n),
        }
    }

    /// Sequence numbers this sequence hands off to.
    pub fn follows(&self) -> impl Iterator<Item = u16> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Follow(n) => Some(*n),
            _ => None,
        })
    }
}

/// Problems found in a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AutomationError {
    /// `FOLLOW` names a sequence that is not declared.
    #[error("FOLLOW({0}) names an undeclared sequence")]
    UnknownSequence(u16),

    /// LCD text does not fit a display row.
    #[error("LCD({row}) text: {source}")]
    Text {
        /// Row of the offending step.
        row: u8,
        /// What was wrong with the text.
        source: FormatError,
    },
}

const AUTOSTART_STEPS: [Step; 5] = [
    Step::SetTrack {
        track: Track('A'),
        mode: TrackMode::Main,
    },
    Step::SetTrack {
        track: Track('B'),
        mode: TrackMode::Prog,
    },
    Step::SetPower {
        track: Track('A'),
        on: true,
    },
    Step::SetPower {
        track: Track('B'),
        on: true,
    },
    Step::Follow(1),
];

// Clears the command station's system messages from rows 2..=8
const CLEAR_MESSAGES_STEPS: [Step; 9] = [
    Step::Lcd { row: 2, text: "" },
    Step::Lcd { row: 3, text: "" },
    Step::Lcd { row: 4, text: "" },
    Step::Lcd { row: 5, text: "" },
    Step::Lcd { row: 6, text: "" },
    Step::Lcd { row: 7, text: "" },
    Step::Lcd { row: 8, text: "" },
    Step::Delay(1000),
    Step::Follow(1),
];

/// Power-up: configure and power both districts, then hand off.
pub const AUTOSTART: Sequence = Sequence {
    trigger: Trigger::Autostart,
    steps: &AUTOSTART_STEPS,
};

/// Sequence 1: keep the system message rows clear, once a second.
pub const CLEAR_MESSAGES: Sequence = Sequence {
    trigger: Trigger::Sequence(1),
    steps: &CLEAR_MESSAGES_STEPS,
};

/// Everything declared for startup.
pub const STARTUP: [Sequence; 2] = [AUTOSTART, CLEAR_MESSAGES];

/// Checks FOLLOW targets and LCD text widths.
pub fn validate(sequences: &[Sequence]) -> Result<(), AutomationError> {
    let declared = |n: u16| sequences.iter().any(|s| s.number() == Some(n));

    for sequence in sequences {
        if let Some(missing) = sequence.follows().find(|n| !declared(*n)) {
            return Err(AutomationError::UnknownSequence(missing));
        }
        for step in sequence.steps {
            if let Step::Lcd { row, text } = step {
                check_width(text, DISPLAY_WIDTH)
                    .map_err(|source| AutomationError::Text { row: *row, source })?;
            }
        }
    }
    Ok(())
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetTrack { track, mode } => {
                let mode = match mode {
                    TrackMode::Main => "MAIN",
                    TrackMode::Prog => "PROG",
                };
                write!(f, "SET_TRACK({}, {})", track.0, mode)
            }
            Self::SetPower { track, on } => {
                write!(f, "SET_POWER({}, {})", track.0, if *on { "ON" } else { "OFF" })
            }
            Self::Lcd { row, text } => write!(f, "LCD({}, {:?})", row, text),
            Self::Delay(ms) => write!(f, "DELAY({})", ms),
            Self::Follow(n) => write!(f, "FOLLOW({})", n),
        }
    }
}
