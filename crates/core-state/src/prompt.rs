//! One-line prompt shown in the message bar while a command collects input.

use core_syntax::Highlight;

/// Cursor and scroll position captured when a find session starts, so `Esc`
/// can put everything back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorSnapshot {
    pub cx: usize,
    pub cy: usize,
    pub rowoff: usize,
    pub coloff: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// State carried between keystrokes of an incremental search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindSession {
    /// Row of the current match.
    pub last_match: Option<usize>,
    pub direction: SearchDirection,
    /// Highlight of the matched row before the match overlay was painted.
    pub saved_hl: Option<(usize, Vec<Highlight>)>,
    pub origin: CursorSnapshot,
}

impl FindSession {
    pub fn new(origin: CursorSnapshot) -> Self {
        Self {
            last_match: None,
            direction: SearchDirection::Forward,
            saved_hl: None,
            origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Find(FindSession),
}

impl PromptKind {
    /// Text around the query in the message bar.
    fn frame(&self) -> (&'static str, &'static str) {
        match self {
            PromptKind::SaveAs => ("Save as: ", " (ESC to cancel)"),
            PromptKind::Find(_) => ("Search: ", " (Use ESC/Arrows/Enter)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: Vec<u8>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: Vec::new(),
        }
    }

    pub fn display(&self) -> String {
        let (before, after) = self.kind.frame();
        format!("{before}{}{after}", String::from_utf8_lossy(&self.input))
    }

    pub fn push(&mut self, byte: u8) {
        self.input.push(byte);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }
}
