//! Panel configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use throttle_panel::config::{Config, DisplayConfig, FilterConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.filter.opcode, b'U');
//!
//! // Or customize
//! let config = Config::default()
//!     .with_display(DisplayConfig::default().with_rows(4))
//!     .with_filter(FilterConfig::default().with_opcode(b'u'));
//! ```

use crate::format::DISPLAY_WIDTH;
use heapless::String as HString;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Rows on the panel unless configured otherwise
pub const DEFAULT_ROWS: u8 = 8;

/// Fewest rows a panel may have: the filter renders two
pub const MIN_ROWS: u8 = 2;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete panel configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Character display geometry
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: DisplayConfig,
    /// Inbound message filter settings
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: FilterConfig,
    /// Device identification
    #[cfg_attr(feature = "serde", serde(default))]
    pub device: DeviceConfig,
}

impl Config {
    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set filter configuration
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Character display configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Addressable rows (at least [`MIN_ROWS`])
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_rows"))]
    pub rows: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS }
    }
}

impl DisplayConfig {
    /// Set the row count (at least [`MIN_ROWS`])
    pub fn with_rows(mut self, rows: u8) -> Self {
        self.rows = rows.max(MIN_ROWS);
        self
    }

    /// Columns per row. Fixed by the label layout.
    pub fn columns(&self) -> usize {
        DISPLAY_WIDTH
    }
}

/// Row counts from files get the same floor as [`DisplayConfig::with_rows`].
#[cfg(feature = "serde")]
fn deserialize_rows<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let rows = <u8 as serde::Deserialize>::deserialize(deserializer)?;
    Ok(rows.max(MIN_ROWS))
}

// ============================================================================
// Filter Config
// ============================================================================

/// Inbound filter configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Opcode of the throttle message family
    pub opcode: u8,
    /// Whether the filter claims messages at all
    pub enabled: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            opcode: b'U',
            enabled: true,
        }
    }
}

impl FilterConfig {
    /// Set the opcode the filter listens for
    pub fn with_opcode(mut self, opcode: u8) -> Self {
        self.opcode = opcode;
        self
    }

    /// Enable or disable the filter
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable panel name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("throttle-panel"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
