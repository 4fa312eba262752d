//! Row store: the document as an ordered list of byte rows.
//!
//! Every mutation goes through `Document`, which keeps each row's derived
//! state (`render`, `hl`, `hl_open_comment`) in step with its bytes. When a
//! row's open-comment state flips, the rows below are rescanned until one
//! comes out unchanged. The cascade is a loop, so its depth never depends on
//! the length of the comment.
//!
//! Positions are plain byte offsets. Out-of-range indices are no-ops or get
//! clamped; no operation here fails.

pub mod row;
pub use row::{DEFAULT_TAB_STOP, Row, expand_tabs};

use core_syntax::{Highlight, Syntax, highlight_line};
use std::path::{Path, PathBuf};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    /// Count of content changes since load or last save.
    dirty: u64,
    filename: Option<PathBuf>,
    syntax: Option<&'static Syntax>,
    tab_stop: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl Document {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            syntax: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a clean document from already-split lines.
    pub fn from_lines<I>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        for line in lines {
            let at = doc.rows.len();
            doc.insert_row(at, line);
        }
        doc.dirty = 0;
        doc
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = 0;
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: Option<PathBuf>) {
        self.filename = path;
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Switch language profile and rescan every row top to bottom.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        let mut open = false;
        for row in &mut self.rows {
            let out = highlight_line(&row.render, syntax, open);
            row.hl = out.hl;
            row.hl_open_comment = out.open_comment;
            open = out.open_comment;
        }
    }

    /// Mutable view of a row's highlight, for temporary overlays such as
    /// search matches. Content and open-comment state stay untouched.
    pub fn highlight_mut(&mut self, at: usize) -> Option<&mut [Highlight]> {
        self.rows.get_mut(at).map(|r| r.hl.as_mut_slice())
    }

    /// Insert a new row at `at` (`0..=num_rows`).
    pub fn insert_row(&mut self, at: usize, bytes: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(at, bytes.into()));
        self.reindex_from(at + 1);
        self.update_row(at);
        // The row below now follows a different predecessor.
        if at + 1 < self.rows.len() {
            self.rehighlight_from(at + 1);
        }
        self.dirty += 1;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.reindex_from(at);
        if at < self.rows.len() {
            self.rehighlight_from(at);
        }
        self.dirty += 1;
    }

    /// Insert `byte` into row `row` at `at`, clamped to the row length.
    pub fn insert_char(&mut self, row: usize, at: usize, byte: u8) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.chars.len());
        r.chars.insert(at, byte);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Remove the byte at `at`; no-op when `at` is not inside the row.
    pub fn delete_char(&mut self, row: usize, at: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at >= r.chars.len() {
            return;
        }
        r.chars.remove(at);
        self.update_row(row);
        self.dirty += 1;
    }

    pub fn append_string(&mut self, row: usize, bytes: &[u8]) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.chars.extend_from_slice(bytes);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Cut row `row` at `at`; the tail becomes a new row directly below.
    pub fn split_row(&mut self, row: usize, at: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.chars.len());
        let tail = r.chars.split_off(at);
        self.update_row(row);
        self.insert_row(row + 1, tail);
    }

    /// Every row followed by `\n`.
    pub fn serialize(&self) -> Vec<u8> {
        let len = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut out = Vec::with_capacity(len);
        for r in &self.rows {
            out.extend_from_slice(&r.chars);
            out.push(b'\n');
        }
        out
    }

    fn reindex_from(&mut self, at: usize) {
        for (i, r) in self.rows.iter_mut().enumerate().skip(at) {
            r.idx = i;
        }
    }

    fn update_row(&mut self, at: usize) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(at) {
            r.update_render(tab_stop);
            self.rehighlight_from(at);
        }
    }

    /// Rescan row `at`, then keep going while the open-comment state that
    /// feeds the next row changes.
    fn rehighlight_from(&mut self, at: usize) {
        let syntax = self.syntax;
        let mut i = at;
        while i < self.rows.len() {
            let starts_in = i > 0 && self.rows[i - 1].hl_open_comment;
            let r = &mut self.rows[i];
            let out = highlight_line(&r.render, syntax, starts_in);
            let changed = r.hl_open_comment != out.open_comment;
            r.hl = out.hl;
            r.hl_open_comment = out.open_comment;
            if !changed {
                break;
            }
            i += 1;
        }
        if i > at {
            trace!(target: "text.highlight", from = at, to = i, "cascade");
        }
    }
}

/// Split file contents into rows. Lines end at `\n`; trailing `\r` bytes are
/// dropped. A final terminator does not start an extra row.
pub fn parse_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let mut end = line.len();
            while end > 0 && line[end - 1] == b'\r' {
                end -= 1;
            }
            line[..end].to_vec()
        })
        .collect()
}
