//! Locomotive roster: identifier to display label and function map.
//!
//! The roster is configuration data. It is built once at startup (from the
//! shipped [`LAYOUT_ROSTER`] table or a roster document) and only read after
//! that. Lookups never fail on an unknown identifier while a default entry is
//! configured; they return the default instead.
//!
//! # Label layout
//!
//! Labels are laid out for the 16 column display:
//!
//! ```text
//! 0      7                      23
//! |class |name..................|
//! 0-6-0  BR 08  3986
//! ```
//!
//! Columns `0..6` hold the wheel arrangement or class code, column 6 is a
//! separator, and columns `7..23` hold the name shown on its own row.
//!
//! # Example
//!
//! ```rust
//! use throttle_panel::roster::Roster;
//!
//! let roster = Roster::layout().unwrap();
//! let entry = roster.lookup(3986).unwrap();
//! assert_eq!(entry.label().class(), "0-6-0 ");
//! assert_eq!(entry.label().name(), "BR 08  3986     ");
//!
//! // Unknown identifiers fall back to the default decoder entry
//! assert_eq!(roster.lookup(42).unwrap().id(), 3);
//! ```

use crate::format::{check_width, FormatError, DISPLAY_WIDTH};
use heapless::String as HString;
use heapless::Vec as HVec;
use thiserror::Error;

/// Columns holding the class code.
pub const CLASS_WIDTH: usize = 6;

/// First column of the name.
pub const NAME_OFFSET: usize = CLASS_WIDTH + 1;

/// Full width of a stored label.
pub const LABEL_WIDTH: usize = NAME_OFFSET + DISPLAY_WIDTH;

/// Maximum length of a function list.
pub const MAX_FUNCTIONS_LEN: usize = 128;

/// Maximum number of roster entries.
pub const MAX_ROSTER: usize = 32;

/// Identifier of the default entry in [`LAYOUT_ROSTER`].
pub const LAYOUT_DEFAULT_ID: u16 = 3;

/// Static description of one roster entry, before validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterSpec {
    /// Locomotive identifier (DCC address).
    pub id: u16,
    /// Label in the fixed column layout.
    pub label: &'static str,
    /// `/`-separated function names.
    pub functions: &'static str,
}

impl RosterSpec {
    /// Creates a spec entry.
    pub const fn new(id: u16, label: &'static str, functions: &'static str) -> Self {
        Self {
            id,
            label,
            functions,
        }
    }
}

/// The layout's roster, formatted for the 16 column display.
///
/// Entry `3` doubles as the default decoder record.
pub const LAYOUT_ROSTER: [RosterSpec; 4] = [
    RosterSpec::new(
        3,
        "       Default decoder ",
        "F0/F1/F2/F3/F4/F5/F6/F7/F8/F9/F10/",
    ),
    RosterSpec::new(3986, "0-6-0  BR 08  3986     ", ""),
    RosterSpec::new(84, "4-6-2  BR A3  Trigo    ", ""),
    RosterSpec::new(8965, "0-6-0T BR J50 68965    ", ""),
];

/// Errors building a roster.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Two entries share an identifier.
    #[error("roster id {0} is declared more than once")]
    DuplicateId(u16),

    /// More than [`MAX_ROSTER`] entries.
    #[error("roster holds at most {} entries", MAX_ROSTER)]
    TableFull,

    /// The designated default identifier has no entry.
    #[error("default roster id {0} has no entry")]
    UnknownDefault(u16),

    /// A label or function list does not fit the display layout.
    #[error("roster id {id}: {source}")]
    Label {
        /// Offending entry.
        id: u16,
        /// What was wrong with it.
        source: FormatError,
    },

    /// A process-wide roster was already installed.
    #[error("a roster is already installed")]
    AlreadyInstalled,
}

/// A label padded to exactly [`LABEL_WIDTH`] printable columns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RosterLabel(HString<LABEL_WIDTH>);

impl RosterLabel {
    /// Validates and pads a label.
    ///
    /// Shorter labels are right-padded with spaces. Longer or non-ASCII
    /// labels are rejected, since the fixed column offsets would no longer
    /// line up on the display.
    pub fn new(text: &str) -> Result<Self, FormatError> {
        check_width(text, LABEL_WIDTH)?;
        let mut buf = HString::new();
        let _ = buf.push_str(text);
        while buf.len() < LABEL_WIDTH {
            let _ = buf.push(' ');
        }
        Ok(Self(buf))
    }

    /// Wheel arrangement or class code (columns `0..6`).
    pub fn class(&self) -> &str {
        // Always LABEL_WIDTH ASCII bytes
        &self.0.as_str()[..CLASS_WIDTH]
    }

    /// Name shown on the second row (columns `7..23`).
    pub fn name(&self) -> &str {
        &self.0.as_str()[NAME_OFFSET..]
    }

    /// The whole label.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A named function slot on a locomotive decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionSlot<'a> {
    /// Function number (`F0` is 0).
    pub number: u8,
    /// Display name, without the momentary marker.
    pub name: &'a str,
    /// Whether the function only stays on while the key is held.
    pub momentary: bool,
}

/// One locomotive in the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    id: u16,
    label: RosterLabel,
    functions: HString<MAX_FUNCTIONS_LEN>,
}

impl RosterEntry {
    /// Validates a single entry.
    pub fn new(id: u16, label: &str, functions: &str) -> Result<Self, RosterError> {
        let label = RosterLabel::new(label).map_err(|source| RosterError::Label { id, source })?;
        check_width(functions, MAX_FUNCTIONS_LEN)
            .map_err(|source| RosterError::Label { id, source })?;
        let mut list = HString::new();
        let _ = list.push_str(functions);
        Ok(Self {
            id,
            label,
            functions: list,
        })
    }

    /// Locomotive identifier.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Display label.
    pub fn label(&self) -> &RosterLabel {
        &self.label
    }

    /// Raw `/`-separated function list as declared.
    pub fn function_list(&self) -> &str {
        self.functions.as_str()
    }

    /// Named functions in slot order.
    ///
    /// Slot numbers follow the position in the list, so an empty slot
    /// (`"F0//F2"`) leaves a gap instead of shifting later functions down.
    /// A leading `*` marks a momentary function.
    pub fn functions(&self) -> impl Iterator<Item = FunctionSlot<'_>> {
        self.functions
            .split('/')
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(number, name)| {
                let number = u8::try_from(number).ok()?;
                let (name, momentary) = match name.strip_prefix('*') {
                    Some(rest) => (rest, true),
                    None => (name, false),
                };
                Some(FunctionSlot {
                    number,
                    name,
                    momentary,
                })
            })
    }
}

/// Ordered roster table with an optional default entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: HVec<RosterEntry, MAX_ROSTER>,
    default_id: Option<u16>,
}

impl Roster {
    /// An empty roster with no default.
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout's shipped roster ([`LAYOUT_ROSTER`], default id 3).
    pub fn layout() -> Result<Self, RosterError> {
        Self::from_specs(&LAYOUT_ROSTER, Some(LAYOUT_DEFAULT_ID))
    }

    /// Builds a roster from static specs.
    pub fn from_specs(specs: &[RosterSpec], default_id: Option<u16>) -> Result<Self, RosterError> {
        let mut roster = Self::new();
        for spec in specs {
            roster.insert(RosterEntry::new(spec.id, spec.label, spec.functions)?)?;
        }
        roster.set_default(default_id)?;
        Ok(roster)
    }

    /// Appends an entry, keeping declaration order.
    pub fn insert(&mut self, entry: RosterEntry) -> Result<(), RosterError> {
        if self.exact(entry.id).is_some() {
            return Err(RosterError::DuplicateId(entry.id));
        }
        self.entries
            .push(entry)
            .map_err(|_| RosterError::TableFull)
    }

    /// Designates the fallback entry. It must already be in the table.
    pub fn set_default(&mut self, default_id: Option<u16>) -> Result<(), RosterError> {
        if let Some(id) = default_id {
            if self.exact(id).is_none() {
                return Err(RosterError::UnknownDefault(id));
            }
        }
        self.default_id = default_id;
        Ok(())
    }

    /// Finds the entry for `id`, falling back to the default entry.
    ///
    /// Negative identifiers never match an entry directly. Returns `None`
    /// only when nothing matches and no default is configured.
    pub fn lookup(&self, id: i16) -> Option<&RosterEntry> {
        u16::try_from(id)
            .ok()
            .and_then(|id| self.exact(id))
            .or_else(|| self.default_entry())
    }

    /// Finds the entry for `id` without falling back.
    pub fn exact(&self, id: u16) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The fallback entry, if configured.
    pub fn default_entry(&self) -> Option<&RosterEntry> {
        self.default_id.and_then(|id| self.exact(id))
    }

    /// Identifier of the fallback entry.
    pub fn default_id(&self) -> Option<u16> {
        self.default_id
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Process-wide roster
// ============================================================================

#[cfg(feature = "std")]
static GLOBAL: std::sync::OnceLock<Roster> = std::sync::OnceLock::new();

/// Installs the process-wide roster. Call once, before handling messages.
#[cfg(feature = "std")]
pub fn install(roster: Roster) -> Result<&'static Roster, RosterError> {
    GLOBAL
        .set(roster)
        .map_err(|_| RosterError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(RosterError::AlreadyInstalled)
}

/// The process-wide roster, if one has been installed.
#[cfg(feature = "std")]
pub fn global() -> Option<&'static Roster> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_roster_loads() {
        let roster = Roster::layout().unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.default_id(), Some(3));
        let ids: Vec<u16> = roster.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![3, 3986, 84, 8965]);
    }

    #[test]
    fn layout_labels_are_full_width() {
        for spec in LAYOUT_ROSTER {
            assert_eq!(spec.label.len(), LABEL_WIDTH, "label for {}", spec.id);
        }
    }

    #[test]
    fn lookup_exact_match() {
        let roster = Roster::layout().unwrap();
        let entry = roster.lookup(8965).unwrap();
        assert_eq!(entry.id(), 8965);
        assert_eq!(entry.label().class(), "0-6-0T");
        assert_eq!(entry.label().name(), "BR J50 68965    ");
    }

    #[test]
    fn lookup_falls_back_to_default() {
        let roster = Roster::layout().unwrap();
        for id in [0, 1, 42, 9999, -1, i16::MIN, i16::MAX] {
            let entry = roster.lookup(id).unwrap();
            assert_eq!(entry.id(), 3, "id {}", id);
            assert_eq!(entry.label().name(), "Default decoder ");
        }
    }

    #[test]
    fn lookup_without_default_is_none() {
        let roster = Roster::from_specs(&LAYOUT_ROSTER[1..], None).unwrap();
        assert!(roster.lookup(42).is_none());
        assert!(roster.lookup(84).is_some());
    }

    #[test]
    fn short_label_is_padded() {
        let label = RosterLabel::new("2-8-0  Big Boy").unwrap();
        assert_eq!(label.as_str().len(), LABEL_WIDTH);
        assert_eq!(label.class(), "2-8-0 ");
        assert_eq!(label.name(), "Big Boy         ");
    }

    #[test]
    fn label_shorter_than_class_is_padded() {
        let label = RosterLabel::new("Bo").unwrap();
        assert_eq!(label.class(), "Bo    ");
        assert_eq!(label.name(), "                ");
    }

    #[test]
    fn overlong_label_rejected() {
        assert_eq!(
            RosterEntry::new(7, "4-6-2  BR A3  Flying Scotsman", ""),
            Err(RosterError::Label {
                id: 7,
                source: FormatError::TextOverflow { len: 29, max: 23 },
            })
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut roster = Roster::layout().unwrap();
        let dup = RosterEntry::new(84, "4-6-2  Other", "").unwrap();
        assert_eq!(roster.insert(dup), Err(RosterError::DuplicateId(84)));
    }

    #[test]
    fn unknown_default_rejected() {
        assert_eq!(
            Roster::from_specs(&LAYOUT_ROSTER, Some(1234)),
            Err(RosterError::UnknownDefault(1234))
        );
    }

    #[test]
    fn table_full_rejected() {
        let mut roster = Roster::new();
        for id in 0..MAX_ROSTER as u16 {
            roster.insert(RosterEntry::new(id, "", "").unwrap()).unwrap();
        }
        let extra = RosterEntry::new(999, "", "").unwrap();
        assert_eq!(roster.insert(extra), Err(RosterError::TableFull));
    }

    #[test]
    fn function_slots_parsed() {
        let entry = RosterEntry::new(1, "", "Lights/*Horn//Bell").unwrap();
        let slots: Vec<_> = entry.functions().collect();
        assert_eq!(
            slots,
            vec![
                FunctionSlot {
                    number: 0,
                    name: "Lights",
                    momentary: false
                },
                FunctionSlot {
                    number: 1,
                    name: "Horn",
                    momentary: true
                },
                FunctionSlot {
                    number: 3,
                    name: "Bell",
                    momentary: false
                },
            ]
        );
    }

    #[test]
    fn default_decoder_functions() {
        let roster = Roster::layout().unwrap();
        let entry = roster.default_entry().unwrap();
        let names: Vec<&str> = entry.functions().map(|f| f.name).collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names[0], "F0");
        assert_eq!(names[10], "F10");
        assert_eq!(entry.function_list(), "F0/F1/F2/F3/F4/F5/F6/F7/F8/F9/F10/");

        let shunter = roster.lookup(3986).unwrap();
        assert!(shunter.functions().next().is_none());
        assert_eq!(shunter.function_list(), "");
    }
}
