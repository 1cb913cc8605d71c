//! Roster documents for loading the roster from configuration files.
//!
//! These types are `no_std` compatible and can be deserialized using either
//! `serde_json` (desktop) or `serde-json-core` (embedded).
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "serde-json-core")]
//! # {
//! use throttle_panel::messages::parse_roster_document;
//! use throttle_panel::Roster;
//!
//! let json = br#"{
//!     "default": 3,
//!     "entries": [
//!         {"id": 3, "label": "       Default decoder ", "functions": "F0/F1"},
//!         {"id": 84, "label": "4-6-2  BR A3  Trigo"}
//!     ]
//! }"#;
//! let doc = parse_roster_document(json).unwrap();
//! let roster = Roster::from_document(&doc).unwrap();
//! assert_eq!(roster.lookup(84).unwrap().label().name(), "BR A3  Trigo    ");
//! # }
//! ```

use crate::roster::{Roster, RosterEntry, RosterError, MAX_FUNCTIONS_LEN, MAX_ROSTER};
use heapless::String as HString;
use heapless::Vec as HVec;
use serde::{Deserialize, Serialize};

/// Longest label accepted from a document.
///
/// Wider than the display layout so that an overlong label reaches roster
/// validation and is reported, instead of failing deserialization.
pub const MAX_DOC_LABEL: usize = 48;

// ============================================================================
// Document Types
// ============================================================================

/// One roster entry as written in a document.
///
/// # JSON Example
///
/// ```json
/// {"id": 3986, "label": "0-6-0  BR 08  3986", "functions": "Lights/*Horn"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    /// Locomotive identifier
    pub id: u16,
    /// Label in the fixed column layout (padded if short)
    pub label: HString<MAX_DOC_LABEL>,
    /// `/`-separated function names
    #[serde(default)]
    pub functions: HString<MAX_FUNCTIONS_LEN>,
}

impl RosterRecord {
    /// Creates a record, truncating fields that exceed their capacity.
    pub fn new(id: u16, label: &str, functions: &str) -> Self {
        let mut record = Self {
            id,
            label: HString::new(),
            functions: HString::new(),
        };
        for c in label.chars() {
            if record.label.push(c).is_err() {
                break;
            }
        }
        for c in functions.chars() {
            if record.functions.push(c).is_err() {
                break;
            }
        }
        record
    }
}

/// A complete roster document.
///
/// # JSON Example
///
/// ```json
/// {"default": 3, "entries": [{"id": 3, "label": "       Default decoder "}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterDocument {
    /// Identifier of the fallback entry
    #[serde(default)]
    pub default: Option<u16>,
    /// Entries in declaration order
    pub entries: HVec<RosterRecord, MAX_ROSTER>,
}

impl Roster {
    /// Builds and validates a roster from a document.
    pub fn from_document(doc: &RosterDocument) -> Result<Self, RosterError> {
        let mut roster = Self::new();
        for record in &doc.entries {
            roster.insert(RosterEntry::new(
                record.id,
                record.label.as_str(),
                record.functions.as_str(),
            )?)?;
        }
        roster.set_default(doc.default)?;
        Ok(roster)
    }
}

// ============================================================================
// Parsing Functions (using serde-json-core for no_std compatibility)
// ============================================================================

/// Parse a roster document from JSON bytes.
///
/// Works in both `std` and `no_std` environments using `serde-json-core`.
/// Returns `None` if the JSON is malformed or a field exceeds its capacity.
#[cfg(feature = "serde-json-core")]
pub fn parse_roster_document(json: &[u8]) -> Option<RosterDocument> {
    serde_json_core::from_slice(json).ok().map(|(doc, _)| doc)
}

/// Parse a single roster record from JSON bytes.
#[cfg(feature = "serde-json-core")]
pub fn parse_roster_record(json: &[u8]) -> Option<RosterRecord> {
    serde_json_core::from_slice(json).ok().map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;

    // =========================================================================
    // RosterRecord tests
    // =========================================================================

    #[test]
    fn record_new_truncates() {
        let long = "x".repeat(60);
        let record = RosterRecord::new(1, &long, "");
        assert_eq!(record.label.len(), MAX_DOC_LABEL);
    }

    #[test]
    fn document_builds_roster() {
        let mut doc = RosterDocument {
            default: Some(3),
            ..Default::default()
        };
        doc.entries
            .push(RosterRecord::new(3, "       Default decoder ", "F0"))
            .unwrap();
        doc.entries
            .push(RosterRecord::new(84, "4-6-2  BR A3  Trigo", ""))
            .unwrap();

        let roster = Roster::from_document(&doc).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.lookup(1).unwrap().id(), 3);
    }

    #[test]
    fn document_overlong_label_reported() {
        let mut doc = RosterDocument::default();
        doc.entries
            .push(RosterRecord::new(
                5,
                "4-6-2  BR A3  Flying Scotsman",
                "",
            ))
            .unwrap();
        assert_eq!(
            Roster::from_document(&doc),
            Err(RosterError::Label {
                id: 5,
                source: FormatError::TextOverflow { len: 29, max: 23 },
            })
        );
    }

    #[test]
    fn document_unknown_default_reported() {
        let doc = RosterDocument {
            default: Some(9),
            ..Default::default()
        };
        assert_eq!(
            Roster::from_document(&doc),
            Err(RosterError::UnknownDefault(9))
        );
    }

    // =========================================================================
    // JSON tests
    // =========================================================================

    #[cfg(feature = "serde-json-core")]
    #[test]
    fn parse_record_defaults_functions() {
        let record = parse_roster_record(br#"{"id": 84, "label": "4-6-2  BR A3  Trigo"}"#).unwrap();
        assert_eq!(record.id, 84);
        assert!(record.functions.is_empty());
    }

    #[cfg(feature = "serde-json-core")]
    #[test]
    fn parse_document_without_default() {
        let doc = parse_roster_document(br#"{"entries": []}"#).unwrap();
        assert_eq!(doc.default, None);
        assert!(doc.entries.is_empty());
    }

    #[cfg(feature = "serde-json-core")]
    #[test]
    fn parse_document_rejects_malformed() {
        assert!(parse_roster_document(br#"{"entries": [{"id": "x"}]}"#).is_none());
        assert!(parse_roster_document(b"not json").is_none());
    }

    #[cfg(feature = "host")]
    #[test]
    fn serde_json_round_trip_of_layout_record() {
        let record = RosterRecord::new(3986, "0-6-0  BR 08  3986     ", "");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"id\":3986"));
        let back: RosterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
