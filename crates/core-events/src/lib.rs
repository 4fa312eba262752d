//! Key event vocabulary shared by the decoder, the dispatcher and the runtime.
//!
//! The editor runs in raw mode and sees individual bytes, so a logical key is
//! one of three things: a printable byte, a control byte (anything below 0x20
//! that has no dedicated name), or a named key recovered from a byte or an
//! escape sequence. Everything is byte-oriented; there is no Unicode layer.

use std::fmt;
use std::sync::atomic::AtomicU64;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters bumped by the decoder. They are read by tests and logged by the runtime
// on shutdown; nothing else depends on them.
// -------------------------------------------------------------------------------------------------
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0); // logical keys produced
pub static ESCAPE_SEQUENCES: AtomicU64 = AtomicU64::new(0); // escape sequences decoded into a named key
pub static ESCAPE_FALLBACKS: AtomicU64 = AtomicU64::new(0); // truncated / unknown sequences collapsed to Esc

pub const ESC: u8 = 0x1b;
pub const DEL: u8 = 0x7f;

/// Map an ASCII letter to the byte a terminal sends for `Ctrl-<letter>`.
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// Keys with a dedicated meaning, decoded either from a single byte
/// (Enter, Backspace, Esc) or from an escape sequence (everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

/// Canonical logical key produced by the input decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// Printable byte (0x20..=0x7e or any byte >= 0x80).
    Char(u8),
    /// Control byte without a dedicated name (`Ctrl-Q` arrives as `Control(0x11)`, tab as `Control(b'\t')`).
    Control(u8),
    Named(NamedKey),
}

impl KeyToken {
    /// Token for `Ctrl-<letter>`.
    pub const fn ctrl(letter: u8) -> Self {
        KeyToken::Control(ctrl(letter))
    }

    /// Classify a single byte that did not start an escape sequence.
    pub fn from_byte(b: u8) -> Self {
        match b {
            b'\r' => KeyToken::Named(NamedKey::Enter),
            DEL => KeyToken::Named(NamedKey::Backspace),
            ESC => KeyToken::Named(NamedKey::Esc),
            0x00..=0x1f => KeyToken::Control(b),
            _ => KeyToken::Char(b),
        }
    }

    /// Raw byte to insert into the buffer when the dispatcher treats this key as text.
    /// Named keys have no byte representation.
    pub fn as_byte(&self) -> Option<u8> {
        match *self {
            KeyToken::Char(b) | KeyToken::Control(b) => Some(b),
            KeyToken::Named(_) => None,
        }
    }

    pub fn is_named(&self, key: NamedKey) -> bool {
        matches!(self, KeyToken::Named(k) if *k == key)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(b) => write!(f, "{}", *b as char),
            KeyToken::Control(b) => write!(f, "^{}", (b | 0x40) as char),
            KeyToken::Named(n) => write!(f, "<{:?}>", n),
        }
    }
}
