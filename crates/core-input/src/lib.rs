//! Raw byte input decoding.
//!
//! The terminal is in raw mode, so every keystroke arrives as one or more
//! bytes. `KeyDecoder` turns that byte stream into exactly one `KeyToken` per
//! call:
//!
//! * `ESC` starts an escape sequence. Up to two follow-up bytes (three for the
//!   `ESC [ <digit> ~` form) are read, each bounded by the escape timeout. A
//!   truncated or unknown sequence degrades to a bare `Esc`; it is never an
//!   error.
//! * Any other byte is classified on its own (`KeyToken::from_byte`).
//!
//! The decoder is stateless with respect to the editor: it only consumes bytes
//! from a `ByteSource`.

mod stdin;
pub use stdin::StdinSource;

use core_events::{ESC, ESCAPE_FALLBACKS, ESCAPE_SEQUENCES, KEYPRESS_TOTAL, KeyToken, NamedKey};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Blocking byte supplier with a bounded wait.
pub trait ByteSource {
    /// Wait at most `timeout` for one byte. `Ok(None)` means nothing arrived in time.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Scripted input: bytes are handed out in order and the source reports a
/// timeout once it is drained.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyDecoder {
    escape_timeout: Duration,
    idle_timeout: Duration,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE_TIMEOUT, DEFAULT_IDLE_TIMEOUT)
    }
}

impl KeyDecoder {
    pub fn new(escape_timeout: Duration, idle_timeout: Duration) -> Self {
        Self {
            escape_timeout,
            idle_timeout,
        }
    }

    /// Block until one logical key is available.
    pub fn read_key<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<KeyToken> {
        loop {
            if let Some(key) = self.poll_key(src)? {
                return Ok(key);
            }
        }
    }

    /// Wait up to the idle timeout for a key. Returns `None` when the input stayed
    /// quiet, letting the caller refresh time-based state between keystrokes.
    pub fn poll_key<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<Option<KeyToken>> {
        let Some(first) = src.read_byte(self.idle_timeout)? else {
            return Ok(None);
        };
        let key = if first == ESC {
            self.decode_escape(src)?
        } else {
            KeyToken::from_byte(first)
        };
        KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        trace!(target: "input.decode", %key, "key");
        Ok(Some(key))
    }

    fn decode_escape<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<KeyToken> {
        let Some(first) = src.read_byte(self.escape_timeout)? else {
            return Ok(escape_fallback(&[]));
        };
        let Some(second) = src.read_byte(self.escape_timeout)? else {
            return Ok(escape_fallback(&[first]));
        };
        let named = match (first, second) {
            (b'[', digit @ b'0'..=b'9') => {
                match src.read_byte(self.escape_timeout)? {
                    Some(b'~') => tilde_key(digit),
                    Some(other) => return Ok(escape_fallback(&[first, second, other])),
                    None => return Ok(escape_fallback(&[first, second])),
                }
            }
            (b'[', b'A') => Some(NamedKey::Up),
            (b'[', b'B') => Some(NamedKey::Down),
            (b'[', b'C') => Some(NamedKey::Right),
            (b'[', b'D') => Some(NamedKey::Left),
            (b'[', b'H') | (b'O', b'H') => Some(NamedKey::Home),
            (b'[', b'F') | (b'O', b'F') => Some(NamedKey::End),
            _ => None,
        };
        match named {
            Some(key) => {
                ESCAPE_SEQUENCES.fetch_add(1, Ordering::Relaxed);
                Ok(KeyToken::Named(key))
            }
            None => Ok(escape_fallback(&[first, second])),
        }
    }
}

/// `ESC [ <digit> ~` forms.
fn tilde_key(digit: u8) -> Option<NamedKey> {
    match digit {
        b'1' | b'7' => Some(NamedKey::Home),
        b'3' => Some(NamedKey::Delete),
        b'4' | b'8' => Some(NamedKey::End),
        b'5' => Some(NamedKey::PageUp),
        b'6' => Some(NamedKey::PageDown),
        _ => None,
    }
}

fn escape_fallback(consumed: &[u8]) -> KeyToken {
    ESCAPE_FALLBACKS.fetch_add(1, Ordering::Relaxed);
    // Only the length is logged; the bytes may be part of typed text.
    trace!(target: "input.decode", consumed = consumed.len(), "escape_fallback");
    KeyToken::Named(NamedKey::Esc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::ctrl;

    fn decode_all(bytes: &[u8]) -> Vec<KeyToken> {
        let mut src: VecDeque<u8> = bytes.iter().copied().collect();
        let decoder = KeyDecoder::default();
        let mut out = Vec::new();
        while let Some(key) = decoder.poll_key(&mut src).unwrap() {
            out.push(key);
        }
        out
    }

    fn named(key: NamedKey) -> KeyToken {
        KeyToken::Named(key)
    }

    #[test]
    fn arrows_decode() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                named(NamedKey::Up),
                named(NamedKey::Down),
                named(NamedKey::Right),
                named(NamedKey::Left)
            ]
        );
    }

    #[test]
    fn home_end_variants() {
        assert_eq!(
            decode_all(b"\x1b[H\x1bOH\x1b[1~\x1b[7~"),
            vec![named(NamedKey::Home); 4]
        );
        assert_eq!(
            decode_all(b"\x1b[F\x1bOF\x1b[4~\x1b[8~"),
            vec![named(NamedKey::End); 4]
        );
    }

    #[test]
    fn tilde_sequences() {
        assert_eq!(
            decode_all(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![
                named(NamedKey::Delete),
                named(NamedKey::PageUp),
                named(NamedKey::PageDown)
            ]
        );
    }

    #[test]
    fn lone_escape_is_esc() {
        assert_eq!(decode_all(b"\x1b"), vec![named(NamedKey::Esc)]);
    }

    #[test]
    fn truncated_sequence_degrades_to_esc() {
        assert_eq!(decode_all(b"\x1b["), vec![named(NamedKey::Esc)]);
        assert_eq!(decode_all(b"\x1b[5"), vec![named(NamedKey::Esc)]);
    }

    #[test]
    fn unknown_sequences_collapse_to_esc() {
        // `ESC [ Z` is consumed whole; the next byte decodes independently.
        assert_eq!(
            decode_all(b"\x1b[Zq"),
            vec![named(NamedKey::Esc), KeyToken::Char(b'q')]
        );
        assert_eq!(decode_all(b"\x1b[2~"), vec![named(NamedKey::Esc)]);
        assert_eq!(decode_all(b"\x1b[5x"), vec![named(NamedKey::Esc)]);
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(
            decode_all(&[b'a', b'\r', 0x7f, ctrl(b'q'), b'\t']),
            vec![
                KeyToken::Char(b'a'),
                named(NamedKey::Enter),
                named(NamedKey::Backspace),
                KeyToken::ctrl(b'q'),
                KeyToken::Control(b'\t'),
            ]
        );
    }

    #[test]
    fn poll_key_reports_idle() {
        let mut src = VecDeque::new();
        assert_eq!(KeyDecoder::default().poll_key(&mut src).unwrap(), None);
    }

    #[test]
    fn read_key_returns_first_available_key() {
        let mut src: VecDeque<u8> = b"x".iter().copied().collect();
        assert_eq!(
            KeyDecoder::default().read_key(&mut src).unwrap(),
            KeyToken::Char(b'x')
        );
    }

    #[test]
    fn fallback_bumps_counter() {
        let before = ESCAPE_FALLBACKS.load(Ordering::Relaxed);
        decode_all(b"\x1b[Q");
        assert!(ESCAPE_FALLBACKS.load(Ordering::Relaxed) > before);
    }

    struct Failing;
    impl ByteSource for Failing {
        fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"))
        }
    }

    #[test]
    fn source_errors_propagate() {
        let err = KeyDecoder::default().poll_key(&mut Failing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    mod logging {
        use super::*;
        use std::fmt;
        use std::sync::{Arc, Mutex};
        use tracing::Subscriber;
        use tracing::dispatcher::Dispatch;
        use tracing::field::{Field, Visit};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
        use tracing_subscriber::registry::Registry;

        #[derive(Clone, Default)]
        struct Capture {
            events: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
        }

        #[derive(Default)]
        struct FieldCollector {
            fields: Vec<(String, String)>,
        }

        impl Visit for FieldCollector {
            fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                self.fields
                    .push((field.name().to_string(), format!("{:?}", value)));
            }
        }

        impl<S: Subscriber> Layer<S> for Capture {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let mut collector = FieldCollector::default();
                event.record(&mut collector);
                self.events
                    .lock()
                    .unwrap()
                    .push((event.metadata().target().to_string(), collector.fields));
            }
        }

        #[test]
        fn escape_fallback_logs_length_not_bytes() {
            let capture = Capture::default();
            let events = capture.events.clone();
            let dispatch = Dispatch::new(Registry::default().with(capture));
            tracing::dispatcher::with_default(&dispatch, || {
                decode_all(b"\x1b[Z");
            });
            let events = events.lock().unwrap();
            let (_, fields) = events
                .iter()
                .find(|(target, fields)| {
                    target == "input.decode"
                        && fields.iter().any(|(_, v)| v.contains("escape_fallback"))
                })
                .expect("missing escape_fallback event");
            let consumed = fields
                .iter()
                .find(|(name, _)| name == "consumed")
                .expect("consumed field");
            assert_eq!(consumed.1, "2");
        }
    }
}
