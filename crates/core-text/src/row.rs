//! A single line of the document and its derived display form.

use core_syntax::Highlight;

pub const DEFAULT_TAB_STOP: usize = 8;

/// One line of text. `chars` is authoritative; `render`, `hl` and
/// `hl_open_comment` are derived and only rewritten by `Document`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub(crate) idx: usize,
    pub(crate) chars: Vec<u8>,
    pub(crate) render: Vec<u8>,
    pub(crate) hl: Vec<Highlight>,
    pub(crate) hl_open_comment: bool,
}

impl Row {
    pub(crate) fn new(idx: usize, chars: Vec<u8>) -> Self {
        Self {
            idx,
            chars,
            ..Self::default()
        }
    }

    /// Position of this row in its document.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn size(&self) -> usize {
        self.chars.len()
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn rsize(&self) -> usize {
        self.render.len()
    }

    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    /// Row ends inside an unterminated block comment.
    pub fn open_comment(&self) -> bool {
        self.hl_open_comment
    }

    /// Render column of byte offset `cx`. Offsets past the end count as the end.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        self.chars.iter().take(cx).fold(0, |rx, &b| {
            if b == b'\t' {
                rx + tab_stop - rx % tab_stop
            } else {
                rx + 1
            }
        })
    }

    /// Byte offset whose glyph covers render column `rx`; `size()` when `rx` lies past the end.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let mut cur = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                cur += tab_stop - cur % tab_stop;
            } else {
                cur += 1;
            }
            if cur > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        self.render = expand_tabs(&self.chars, tab_stop);
    }
}

/// Expand every tab to spaces up to the next multiple of `tab_stop`.
pub fn expand_tabs(chars: &[u8], tab_stop: usize) -> Vec<u8> {
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::with_capacity(chars.len() + tabs * tab_stop.saturating_sub(1));
    for &b in chars {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % tab_stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}
