//! Editor state: the document, input mode, status message and quit countdown.
//!
//! Cursor and scroll position live in `core-model::View`; this crate stays
//! document-centric. Status messages are stored here and drawn by
//! `core-render::status`.
//!
//! Time-dependent queries take `now` explicitly so callers (and tests) decide
//! the clock.

pub mod prompt;
pub use prompt::{CursorSnapshot, FindSession, Prompt, PromptKind, SearchDirection};

use core_text::Document;
use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_QUIT_TIMES: u32 = 3;
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Message bar is collecting input for a command.
    Prompt(Prompt),
}

/// Status line message that disappears after its time-to-live.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

pub struct EditorState {
    pub document: Document,
    pub mode: Mode,
    pub ephemeral_status: Option<EphemeralMessage>,
    quit_times: u32,
    quit_remaining: u32,
    message_ttl: Duration,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            mode: Mode::Normal,
            ephemeral_status: None,
            quit_times: DEFAULT_QUIT_TIMES,
            quit_remaining: DEFAULT_QUIT_TIMES,
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }

    /// Extra Ctrl-Q presses required to leave with unsaved changes.
    pub fn with_quit_times(mut self, n: u32) -> Self {
        self.quit_times = n;
        self.quit_remaining = n;
        self
    }

    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.set_status_at(msg, Instant::now());
    }

    pub fn set_status_at<S: Into<String>>(&mut self, msg: S, now: Instant) {
        let text = msg.into();
        trace!(target: "state", len = text.len(), "status");
        self.ephemeral_status = Some(EphemeralMessage {
            text,
            expires_at: now + self.message_ttl,
        });
    }

    /// Message text if it is still within its display window at `now`.
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.ephemeral_status
            .as_ref()
            .filter(|m| now < m.expires_at)
            .map(|m| m.text.as_str())
    }

    /// Drop an expired message; returns true if one was cleared.
    pub fn tick_ephemeral(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && now >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Consume one quit confirmation. Returns the number of presses that
    /// were still outstanding before this one, or `None` once exhausted.
    pub fn take_quit_press(&mut self) -> Option<u32> {
        if self.quit_remaining == 0 {
            return None;
        }
        let left = self.quit_remaining;
        self.quit_remaining -= 1;
        Some(left)
    }

    pub fn reset_quit_countdown(&mut self) {
        self.quit_remaining = self.quit_times;
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        match &self.mode {
            Mode::Prompt(p) => Some(p),
            Mode::Normal => None,
        }
    }
}
