//! Full-frame composition.
//!
//! Every refresh rebuilds the whole screen into one `Writer` buffer:
//!
//! 1. scroll the view so the cursor is visible;
//! 2. hide the cursor and home it;
//! 3. one line per text row (`~` past the end, welcome banner on an empty
//!    unnamed document), each followed by erase-to-end-of-line;
//! 4. reverse-video status bar;
//! 5. message bar (active prompt, else the status message while it is fresh);
//! 6. place the cursor at `(rx - coloff, cy - rowoff)` and show it.
//!
//! Color escapes are emitted only when the category color changes within a
//! row. Control bytes are drawn as an inverse glyph, after which the color
//! that was active is emitted again.

use crate::status::{StatusContext, build_status, truncate};
use crate::style::highlight_color;
use crate::writer::Writer;
use anyhow::Result;
use core_model::{EditorModel, View};
use core_state::EditorState;
use core_syntax::Highlight;
use core_text::Row;
use crossterm::style::Color;
use std::io::{self, Write};
use std::time::Instant;
use tracing::trace;

pub const WELCOME: &str = concat!("Ember editor -- version ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
pub struct RenderEngine {
    frames: u64,
    last_frame_bytes: usize,
    last_render_ns: u64,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame_bytes(&self) -> usize {
        self.last_frame_bytes
    }

    pub fn last_render_ns(&self) -> u64 {
        self.last_render_ns
    }

    /// Build the frame for `model` as of `now`, without writing it anywhere.
    pub fn compose(&mut self, model: &mut EditorModel, now: Instant) -> io::Result<Writer> {
        let started = Instant::now();
        model.scroll();
        let state = model.state();
        let view = model.view();

        let mut w = Writer::with_capacity((view.screen_rows + 2) * (view.screen_cols + 16));
        w.hide_cursor()?;
        w.move_to(0, 0)?;
        draw_rows(&mut w, state, view)?;
        draw_status_bar(&mut w, state, view)?;
        draw_message_bar(&mut w, state, view, now)?;
        w.move_to(
            view.rx.saturating_sub(view.coloff),
            view.cy.saturating_sub(view.rowoff),
        )?;
        w.show_cursor()?;

        self.frames += 1;
        self.last_frame_bytes = w.len();
        self.last_render_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        trace!(
            target: "render",
            frame = self.frames,
            bytes = self.last_frame_bytes,
            ns = self.last_render_ns,
            "compose"
        );
        Ok(w)
    }

    /// Compose and hand the frame to `out` in one write.
    pub fn render<W: Write + ?Sized>(
        &mut self,
        model: &mut EditorModel,
        now: Instant,
        out: &mut W,
    ) -> Result<()> {
        let frame = self.compose(model, now)?;
        frame.flush_to(out)?;
        Ok(())
    }
}

fn draw_rows(w: &mut Writer, state: &EditorState, view: &View) -> io::Result<()> {
    let doc = &state.document;
    let show_welcome = doc.is_empty() && doc.filename().is_none();
    for y in 0..view.screen_rows {
        match doc.row(y + view.rowoff) {
            Some(row) => draw_row(w, row, view.coloff, view.screen_cols)?,
            None if show_welcome && y == view.screen_rows / 3 => {
                draw_welcome(w, view.screen_cols)
            }
            None => w.print(b"~"),
        }
        w.clear_line()?;
        w.newline();
    }
    Ok(())
}

fn draw_welcome(w: &mut Writer, cols: usize) {
    let msg = truncate(WELCOME, cols);
    let mut padding = (cols - msg.len()) / 2;
    if padding > 0 {
        w.print(b"~");
        padding -= 1;
    }
    w.print(" ".repeat(padding).as_bytes());
    w.print(msg.as_bytes());
}

/// Visible slice of one row with syntax colors.
fn draw_row(w: &mut Writer, row: &Row, coloff: usize, cols: usize) -> io::Result<()> {
    let render = row.render();
    let start = coloff.min(render.len());
    let end = coloff.saturating_add(cols).min(render.len());
    let mut current: Option<Color> = None;
    for (&b, &hl) in render[start..end].iter().zip(&row.hl()[start..end]) {
        if b.is_ascii_control() {
            let glyph = if b <= 26 { b'@' + b } else { b'?' };
            w.reverse()?;
            w.print(&[glyph]);
            w.reset_attributes()?;
            if let Some(color) = current {
                w.fg(color)?;
            }
        } else if hl == Highlight::Normal {
            if current.is_some() {
                w.fg(Color::Reset)?;
                current = None;
            }
            w.print(&[b]);
        } else {
            let color = highlight_color(hl);
            if current != Some(color) {
                w.fg(color)?;
                current = Some(color);
            }
            w.print(&[b]);
        }
    }
    w.fg(Color::Reset)
}

fn draw_status_bar(w: &mut Writer, state: &EditorState, view: &View) -> io::Result<()> {
    let doc = &state.document;
    let ctx = StatusContext {
        file_name: doc.filename(),
        num_rows: doc.num_rows(),
        dirty: doc.is_dirty(),
        file_type: doc.syntax().map(|s| s.file_type),
        cy: view.cy,
    };
    w.reverse()?;
    w.print(build_status(&ctx, view.screen_cols).as_bytes());
    w.reset_attributes()?;
    w.newline();
    Ok(())
}

fn draw_message_bar(
    w: &mut Writer,
    state: &EditorState,
    view: &View,
    now: Instant,
) -> io::Result<()> {
    w.clear_line()?;
    let prompt = state.prompt().map(|p| p.display());
    let msg = prompt.as_deref().or_else(|| state.status_message(now));
    if let Some(msg) = msg {
        w.print(truncate(msg, view.screen_cols).as_bytes());
    }
    Ok(())
}
