//! Inbound throttle message filter.
//!
//! The command station hands every parsed message to the panel before its
//! own handling. [`InboundFilter`] claims the throttle controller's `U`
//! family, renders the matching two-row status onto the display, and tells
//! the caller whether the message was consumed.
//!
//! # Message family
//!
//! | Message | Sub-command | Rows |
//! |---------|-------------|------|
//! | `<U 0 [controller]>` | [`UCommand::Connected`] | fixed |
//! | `<U 1 [try]>` | [`UCommand::WaitRoster`] | fixed |
//! | `<U 2 loco>` | [`UCommand::Loco`] | id + class, name |
//! | `<U 3>` | [`UCommand::WaitPotStop`] | fixed |
//! | `<U 4 direction>` | [`UCommand::WaitPotSpeed`] | fixed + direction |
//!
//! Anything else is declined: other opcodes, unknown sub-commands, and
//! locomotives that are neither in the roster nor covered by a default
//! entry. A declined message produces no output and the command station
//! carries on with its default handling.
//!
//! # Example
//!
//! ```rust
//! use throttle_panel::{InboundEvent, InboundFilter, Roster};
//!
//! let roster = Roster::layout().unwrap();
//! let filter = InboundFilter::new(&roster);
//!
//! let verdict = filter.filter(&InboundEvent::with_params(b'U', &[2, 3986]));
//! assert!(verdict.is_handled());
//! let rows: Vec<&str> = verdict.lines().iter().map(|(_, l)| l.as_str()).collect();
//! assert_eq!(rows, ["3986      0-6-0 ", "BR 08  3986     "]);
//!
//! // Other opcodes are left alone
//! assert!(!filter.filter(&InboundEvent::with_params(b'X', &[])).is_handled());
//! ```

use crate::config::FilterConfig;
use crate::format::{format_loco_id, DisplayLine, FormatError};
use crate::inbound::InboundEvent;
use crate::roster::Roster;
use crate::traits::CharacterDisplay;
use heapless::Vec as HVec;

/// Column where the class code starts on the locomotive row.
pub const CLASS_COLUMN: usize = 10;

/// Rows written for one message.
pub const MAX_RENDERED_LINES: usize = 2;

/// Fixed rows for [`UCommand::Connected`].
pub const CONNECTED: [&str; 2] = ["Controller      ", "       Connected"];

/// Fixed rows for [`UCommand::WaitRoster`].
pub const WAIT_ROSTER: [&str; 2] = ["Waiting for     ", "          Roster"];

/// Fixed rows for [`UCommand::WaitPotStop`].
pub const WAIT_POT_STOP: [&str; 2] = ["Rotate to Top   ", "   >>>> <<<<    "];

/// First row for [`UCommand::WaitPotSpeed`].
pub const WAIT_POT_SPEED: &str = "Rotate to Speed ";

/// Second row for [`UCommand::WaitPotSpeed`] when moving forward.
pub const SPEED_FORWARD: &str = "   ---- >>>>    ";

/// Second row for [`UCommand::WaitPotSpeed`] when moving in reverse.
pub const SPEED_REVERSE: &str = "   <<<< ----    ";

// ============================================================================
// Sub-commands
// ============================================================================

/// Sub-commands of the throttle controller's `U` message.
///
/// The discriminant is the value of the message's first parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UCommand {
    /// Controller has connected. `<U 0 [controller]>`
    Connected = 0,
    /// Controller is waiting for roster data. `<U 1 [try]>`
    WaitRoster = 1,
    /// Controller selected a locomotive. `<U 2 loco>`
    Loco = 2,
    /// Operator must turn the speed knob to stop. `<U 3>`
    WaitPotStop = 3,
    /// Operator must turn the speed knob to match. `<U 4 direction>`
    WaitPotSpeed = 4,
}

impl TryFrom<i16> for UCommand {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, i16> {
        match value {
            0 => Ok(Self::Connected),
            1 => Ok(Self::WaitRoster),
            2 => Ok(Self::Loco),
            3 => Ok(Self::WaitPotStop),
            4 => Ok(Self::WaitPotSpeed),
            other => Err(other),
        }
    }
}

/// Knob direction carried by [`UCommand::WaitPotSpeed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotDirection {
    /// Parameter value `0`.
    Reverse,
    /// Parameter value `1`.
    Forward,
}

impl PotDirection {
    /// Maps the message parameter; any value other than 0 or 1 is `None`.
    pub fn from_param(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Reverse),
            1 => Some(Self::Forward),
            _ => None,
        }
    }

    fn indicator(self) -> &'static str {
        match self {
            Self::Forward => SPEED_FORWARD,
            Self::Reverse => SPEED_REVERSE,
        }
    }
}

// ============================================================================
// Verdict
// ============================================================================

/// Rows produced for a handled message, in write order.
pub type RenderedLines = HVec<(u8, DisplayLine), MAX_RENDERED_LINES>;

/// Why a message was left for the command station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclineReason {
    /// The filter is switched off in configuration.
    Disabled,
    /// Opcode outside the filtered family.
    OtherOpcode(u8),
    /// The message carried no sub-command.
    MissingSubCommand,
    /// The sub-command is not one the panel renders.
    UnknownSubCommand(i16),
    /// A locomotive message without a locomotive id.
    MissingLocoId,
    /// No roster entry and no default entry for this id.
    UnknownLoco(i16),
    /// The rows could not be laid out in the fixed columns.
    Format(FormatError),
}

/// Outcome of filtering one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The panel consumed the message; the caller must not process it again.
    Handled(RenderedLines),
    /// The panel ignored the message and wrote nothing.
    Declined(DeclineReason),
}

impl Verdict {
    /// Whether the message was consumed.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// Rows to write. Empty when declined.
    pub fn lines(&self) -> &[(u8, DisplayLine)] {
        match self {
            Self::Handled(lines) => lines.as_slice(),
            Self::Declined(_) => &[],
        }
    }

    /// The decline reason, if declined.
    pub fn reason(&self) -> Option<DeclineReason> {
        match self {
            Self::Handled(_) => None,
            Self::Declined(reason) => Some(*reason),
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Filters inbound messages against the roster and renders panel rows.
///
/// Holds no state between messages: each verdict depends only on the event
/// and the read-only roster, so a filter can be shared freely.
#[derive(Clone, Copy, Debug)]
pub struct InboundFilter<'r> {
    roster: &'r Roster,
    opcode: u8,
    enabled: bool,
}

impl<'r> InboundFilter<'r> {
    /// Creates a filter for the default `U` family.
    pub fn new(roster: &'r Roster) -> Self {
        Self::with_config(roster, &FilterConfig::default())
    }

    /// Creates a filter from configuration.
    pub fn with_config(roster: &'r Roster, config: &FilterConfig) -> Self {
        Self {
            roster,
            opcode: config.opcode,
            enabled: config.enabled,
        }
    }

    /// The roster used for locomotive lookups.
    pub fn roster(&self) -> &'r Roster {
        self.roster
    }

    /// Decides whether `event` is ours and renders its rows.
    pub fn filter(&self, event: &InboundEvent) -> Verdict {
        match self.render(event) {
            Ok(lines) => {
                tracing::trace!(
                    opcode = event.opcode(),
                    rows = lines.len(),
                    "inbound message handled"
                );
                Verdict::Handled(lines)
            }
            Err(reason) => {
                if let DeclineReason::Format(err) = reason {
                    tracing::warn!(params = ?event.params(), %err, "cannot lay out panel rows");
                } else {
                    tracing::debug!(opcode = event.opcode(), ?reason, "inbound message declined");
                }
                Verdict::Declined(reason)
            }
        }
    }

    /// Filters `event` and writes any rendered rows to `display`, in order.
    ///
    /// The verdict is returned even if nothing was written. A display error
    /// stops at the failing row and is returned as-is. After the last row of
    /// a handled message the display is asked to
    /// [`present`](CharacterDisplay::present) once.
    pub fn dispatch<D: CharacterDisplay>(
        &self,
        event: &InboundEvent,
        display: &mut D,
    ) -> Result<Verdict, D::Error> {
        let verdict = self.filter(event);
        for (row, line) in verdict.lines() {
            display.write_line(*row, line.as_str())?;
        }
        if verdict.is_handled() {
            display.present()?;
        }
        Ok(verdict)
    }

    fn render(&self, event: &InboundEvent) -> Result<RenderedLines, DeclineReason> {
        if !self.enabled {
            return Err(DeclineReason::Disabled);
        }
        if event.opcode() != self.opcode {
            return Err(DeclineReason::OtherOpcode(event.opcode()));
        }

        let sub = event.param(0).ok_or(DeclineReason::MissingSubCommand)?;
        let command = UCommand::try_from(sub).map_err(DeclineReason::UnknownSubCommand)?;

        match command {
            UCommand::Connected => fixed(&CONNECTED),
            UCommand::WaitRoster => fixed(&WAIT_ROSTER),
            UCommand::WaitPotStop => fixed(&WAIT_POT_STOP),
            UCommand::Loco => {
                let id = event.param(1).ok_or(DeclineReason::MissingLocoId)?;
                self.render_loco(id)
            }
            UCommand::WaitPotSpeed => {
                let direction = event.param(1).and_then(PotDirection::from_param);
                let mut rows = [WAIT_POT_SPEED, ""];
                let count = match direction {
                    Some(dir) => {
                        rows[1] = dir.indicator();
                        2
                    }
                    None => 1,
                };
                fixed(&rows[..count])
            }
        }
    }

    fn render_loco(&self, id: i16) -> Result<RenderedLines, DeclineReason> {
        let entry = self
            .roster
            .lookup(id)
            .ok_or(DeclineReason::UnknownLoco(id))?;
        let label = entry.label();

        let mut top = DisplayLine::blank();
        top.overlay(0, &format_loco_id(id)?)?;
        top.overlay(CLASS_COLUMN, label.class())?;
        let name = DisplayLine::padded(label.name())?;

        let mut lines = RenderedLines::new();
        let _ = lines.push((0, top));
        let _ = lines.push((1, name));
        Ok(lines)
    }
}

impl From<FormatError> for DeclineReason {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

/// Rows from fixed templates, starting at row 0.
fn fixed(templates: &[&str]) -> Result<RenderedLines, DeclineReason> {
    let mut lines = RenderedLines::new();
    for (row, text) in (0u8..).zip(templates) {
        let line = DisplayLine::template(text)?;
        lines
            .push((row, line))
            .map_err(|_| FormatError::TextOverflow {
                len: templates.len(),
                max: MAX_RENDERED_LINES,
            })?;
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockLcd;

    fn rows(verdict: &Verdict) -> Vec<(u8, &str)> {
        verdict
            .lines()
            .iter()
            .map(|(row, line)| (*row, line.as_str()))
            .collect()
    }

    fn u(params: &[i16]) -> InboundEvent {
        InboundEvent::with_params(b'U', params)
    }

    #[test]
    fn templates_are_display_width() {
        let speed = [WAIT_POT_SPEED, SPEED_FORWARD, SPEED_REVERSE];
        let all = CONNECTED
            .iter()
            .chain(&WAIT_ROSTER)
            .chain(&WAIT_POT_STOP)
            .chain(&speed);
        for template in all {
            assert!(DisplayLine::template(template).is_ok(), "{:?}", template);
        }
    }

    #[test]
    fn sub_command_mapping() {
        assert_eq!(UCommand::try_from(0), Ok(UCommand::Connected));
        assert_eq!(UCommand::try_from(4), Ok(UCommand::WaitPotSpeed));
        assert_eq!(UCommand::try_from(5), Err(5));
        assert_eq!(UCommand::try_from(-1), Err(-1));
    }

    #[test]
    fn connected_rows() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[0, 7]));
        assert_eq!(
            rows(&verdict),
            vec![(0, "Controller      "), (1, "       Connected")]
        );
    }

    #[test]
    fn wait_roster_ignores_try_count() {
        let roster = Roster::layout().unwrap();
        let filter = InboundFilter::new(&roster);
        let first = filter.filter(&u(&[1, 1]));
        let fifth = filter.filter(&u(&[1, 5]));
        let bare = filter.filter(&u(&[1]));
        assert_eq!(first, fifth);
        assert_eq!(first, bare);
        assert_eq!(
            rows(&first),
            vec![(0, "Waiting for     "), (1, "          Roster")]
        );
    }

    #[test]
    fn loco_rows_from_roster() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2, 8965]));
        assert_eq!(
            rows(&verdict),
            vec![(0, "8965      0-6-0T"), (1, "BR J50 68965    ")]
        );
    }

    #[test]
    fn loco_short_id_zero_padded() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2, 84]));
        assert_eq!(
            rows(&verdict),
            vec![(0, "0084      4-6-2 "), (1, "BR A3  Trigo    ")]
        );
    }

    #[test]
    fn loco_unknown_uses_default_entry() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2, 42]));
        assert_eq!(
            rows(&verdict),
            vec![(0, "0042            "), (1, "Default decoder ")]
        );
    }

    #[test]
    fn loco_unknown_without_default_declined() {
        let roster = Roster::from_specs(&crate::roster::LAYOUT_ROSTER[1..], None).unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2, 42]));
        assert_eq!(verdict, Verdict::Declined(DeclineReason::UnknownLoco(42)));
    }

    #[test]
    fn loco_missing_id_declined() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2]));
        assert_eq!(verdict.reason(), Some(DeclineReason::MissingLocoId));
    }

    #[test]
    fn loco_five_digit_id_declined() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[2, 10239]));
        assert_eq!(
            verdict.reason(),
            Some(DeclineReason::Format(FormatError::IdentifierOverflow(10239)))
        );
        assert!(verdict.lines().is_empty());
    }

    #[test]
    fn pot_speed_direction_rows() {
        let roster = Roster::layout().unwrap();
        let filter = InboundFilter::new(&roster);

        let forward = filter.filter(&u(&[4, 1]));
        assert_eq!(
            rows(&forward),
            vec![(0, "Rotate to Speed "), (1, "   ---- >>>>    ")]
        );

        let reverse = filter.filter(&u(&[4, 0]));
        assert_eq!(
            rows(&reverse),
            vec![(0, "Rotate to Speed "), (1, "   <<<< ----    ")]
        );
    }

    #[test]
    fn pot_speed_other_direction_only_first_row() {
        let roster = Roster::layout().unwrap();
        let filter = InboundFilter::new(&roster);
        for params in [&[4, 2][..], &[4, -1][..], &[4][..]] {
            let verdict = filter.filter(&u(params));
            assert!(verdict.is_handled());
            assert_eq!(rows(&verdict), vec![(0, "Rotate to Speed ")]);
        }
    }

    #[test]
    fn unknown_sub_command_declined() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[9, 1]));
        assert_eq!(verdict, Verdict::Declined(DeclineReason::UnknownSubCommand(9)));
    }

    #[test]
    fn missing_sub_command_declined() {
        let roster = Roster::layout().unwrap();
        let verdict = InboundFilter::new(&roster).filter(&u(&[]));
        assert_eq!(verdict.reason(), Some(DeclineReason::MissingSubCommand));
    }

    #[test]
    fn other_opcode_declined() {
        let roster = Roster::layout().unwrap();
        let event = InboundEvent::with_params(b'T', &[0]);
        let verdict = InboundFilter::new(&roster).filter(&event);
        assert_eq!(verdict, Verdict::Declined(DeclineReason::OtherOpcode(b'T')));
    }

    #[test]
    fn disabled_filter_declines_everything() {
        let roster = Roster::layout().unwrap();
        let config = FilterConfig::default().with_enabled(false);
        let filter = InboundFilter::with_config(&roster, &config);
        assert_eq!(filter.filter(&u(&[0])).reason(), Some(DeclineReason::Disabled));
        assert_eq!(
            filter.filter(&InboundEvent::with_params(b'T', &[0])).reason(),
            Some(DeclineReason::Disabled)
        );
    }

    #[test]
    fn custom_opcode() {
        let roster = Roster::layout().unwrap();
        let config = FilterConfig::default().with_opcode(b'u');
        let filter = InboundFilter::with_config(&roster, &config);
        assert!(filter.filter(&InboundEvent::with_params(b'u', &[3])).is_handled());
        assert!(!filter.filter(&u(&[3])).is_handled());
    }

    #[test]
    fn dispatch_writes_rows_in_order() {
        let roster = Roster::layout().unwrap();
        let mut lcd = MockLcd::new(8);
        let verdict = InboundFilter::new(&roster)
            .dispatch(&u(&[3]), &mut lcd)
            .unwrap();
        assert!(verdict.is_handled());
        assert_eq!(
            lcd.writes,
            vec![
                (0, "Rotate to Top   ".to_string()),
                (1, "   >>>> <<<<    ".to_string())
            ]
        );
        assert_eq!(lcd.presents, 1);
    }

    #[test]
    fn dispatch_declined_writes_nothing() {
        let roster = Roster::layout().unwrap();
        let mut lcd = MockLcd::new(8);
        let verdict = InboundFilter::new(&roster)
            .dispatch(&u(&[7]), &mut lcd)
            .unwrap();
        assert!(!verdict.is_handled());
        assert!(lcd.writes.is_empty());
        assert_eq!(lcd.presents, 0);
    }

    #[test]
    fn dispatch_surfaces_display_error() {
        let roster = Roster::layout().unwrap();
        let mut lcd = MockLcd::new(8).failing();
        assert_eq!(
            InboundFilter::new(&roster).dispatch(&u(&[0]), &mut lcd),
            Err(())
        );
    }
}
