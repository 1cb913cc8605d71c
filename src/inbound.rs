//! Inbound command station messages.
//!
//! An [`InboundEvent`] is one parsed message: an opcode character and up to
//! [`MAX_PARAMS`] signed 16-bit parameters. Events are built per message,
//! handed to the filter by reference, and dropped afterwards.
//!
//! The command station's text form is `<U 2 3986>`: an opcode character
//! directly after `<`, then whitespace-separated integers.
//!
//! ```rust
//! use throttle_panel::inbound::InboundEvent;
//!
//! let event = InboundEvent::parse("<U 2 3986>").unwrap();
//! assert_eq!(event.opcode(), b'U');
//! assert_eq!(event.param(1), Some(3986));
//! assert_eq!(event.param(2), None);
//! ```

use heapless::Vec as HVec;

/// Most parameters a single message can carry.
pub const MAX_PARAMS: usize = 10;

/// Parameter storage for one message.
pub type Params = HVec<i16, MAX_PARAMS>;

/// A single parsed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundEvent {
    opcode: u8,
    params: Params,
}

impl InboundEvent {
    /// Builds an event from a parser's output.
    ///
    /// `param_count` is clamped to the supplied slice and to [`MAX_PARAMS`],
    /// so a count larger than the data never exposes missing parameters.
    pub fn new(opcode: u8, param_count: usize, params: &[i16]) -> Self {
        let count = param_count.min(params.len()).min(MAX_PARAMS);
        let mut stored = Params::new();
        for &p in &params[..count] {
            let _ = stored.push(p);
        }
        Self {
            opcode,
            params: stored,
        }
    }

    /// Builds an event carrying every supplied parameter.
    pub fn with_params(opcode: u8, params: &[i16]) -> Self {
        Self::new(opcode, params.len(), params)
    }

    /// Parses the `<X p0 p1 ...>` text form.
    ///
    /// Returns `None` if the brackets or opcode are missing, a parameter is
    /// not a 16-bit integer, or there are more than [`MAX_PARAMS`] of them.
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.trim().strip_prefix('<')?.strip_suffix('>')?;
        let mut chars = body.chars();
        let opcode = chars.next().filter(|c| c.is_ascii_graphic())?;
        let opcode = u8::try_from(opcode).ok()?;

        let mut params = Params::new();
        for token in chars.as_str().split_whitespace() {
            let value: i16 = token.parse().ok()?;
            params.push(value).ok()?;
        }

        Some(Self { opcode, params })
    }

    /// Message family discriminator.
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Number of parameters present.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameter at `index`, or `None` if the message was shorter.
    pub fn param(&self, index: usize) -> Option<i16> {
        self.params.get(index).copied()
    }

    /// All parameters.
    pub fn params(&self) -> &[i16] {
        &self.params
    }
}
