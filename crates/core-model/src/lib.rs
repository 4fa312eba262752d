//! Cursor, scroll offsets and the model that pairs them with editor state.
//!
//! A `View` holds presentation state only: the cursor in buffer coordinates
//! (`cx` byte offset, `cy` row), the derived render column `rx`, and the
//! scroll offsets. It never owns text; every operation borrows the
//! `Document` it moves over.
//!
//! Invariants after every public call:
//! * `cy <= num_rows` (`cy == num_rows` is the virtual row past the end).
//! * `cx <= size` of row `cy`, or `cx == 0` on the virtual row.
//!
//! `scroll` is the only place that recomputes `rx`, `rowoff` and `coloff`;
//! the renderer calls it once per frame before drawing.

mod layout;
pub use layout::{BAR_ROWS, Layout};

use core_state::{CursorSnapshot, EditorState};
use core_text::Document;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl View {
    pub fn new(layout: Layout) -> Self {
        let mut v = Self::default();
        v.resize(layout);
        v
    }

    pub fn resize(&mut self, layout: Layout) {
        self.screen_rows = layout.text_rows();
        self.screen_cols = layout.text_cols();
    }

    /// Keep the cursor inside the visible window.
    pub fn scroll(&mut self, doc: &Document) {
        self.rx = doc
            .row(self.cy)
            .map_or(0, |r| r.cx_to_rx(self.cx, doc.tab_stop()));
        let rows = self.screen_rows.max(1);
        let cols = self.screen_cols.max(1);
        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + rows {
            self.rowoff = self.cy + 1 - rows;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + cols {
            self.coloff = self.rx + 1 - cols;
        }
    }

    pub fn move_cursor(&mut self, doc: &Document, movement: Movement) {
        match movement {
            Movement::Up | Movement::Down | Movement::Left | Movement::Right => {
                self.step(doc, movement)
            }
            Movement::Home => self.cx = 0,
            Movement::End => {
                if let Some(r) = doc.row(self.cy) {
                    self.cx = r.size();
                }
            }
            Movement::PageUp => {
                self.cy = self.rowoff;
                for _ in 0..self.screen_rows {
                    self.step(doc, Movement::Up);
                }
            }
            Movement::PageDown => {
                self.cy = (self.rowoff + self.screen_rows)
                    .saturating_sub(1)
                    .min(doc.num_rows());
                for _ in 0..self.screen_rows {
                    self.step(doc, Movement::Down);
                }
            }
        }
        trace!(target: "model.cursor", ?movement, cx = self.cx, cy = self.cy, "move");
    }

    /// One arrow-key step followed by clamping `cx` to the landing row.
    fn step(&mut self, doc: &Document, movement: Movement) {
        let size = doc.row(self.cy).map(|r| r.size());
        match movement {
            Movement::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = doc.row(self.cy).map_or(0, |r| r.size());
                }
            }
            Movement::Right => match size {
                Some(len) if self.cx < len => self.cx += 1,
                Some(_) => {
                    self.cy += 1;
                    self.cx = 0;
                }
                None => {}
            },
            Movement::Up => self.cy = self.cy.saturating_sub(1),
            Movement::Down => {
                if self.cy < doc.num_rows() {
                    self.cy += 1;
                }
            }
            _ => {}
        }
        self.clamp_cx(doc);
    }

    pub fn clamp_cx(&mut self, doc: &Document) {
        let len = doc.row(self.cy).map_or(0, |r| r.size());
        self.cx = self.cx.min(len);
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            cx: self.cx,
            cy: self.cy,
            rowoff: self.rowoff,
            coloff: self.coloff,
        }
    }

    pub fn restore(&mut self, snap: CursorSnapshot) {
        self.cx = snap.cx;
        self.cy = snap.cy;
        self.rowoff = snap.rowoff;
        self.coloff = snap.coloff;
    }
}

/// Editor state plus the single view onto its document.
pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState, layout: Layout) -> Self {
        Self {
            state,
            view: View::new(layout),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable borrows of state and view.
    pub fn split_mut(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Recompute scroll offsets against the current document.
    pub fn scroll(&mut self) {
        self.view.scroll(&self.state.document);
    }
}
