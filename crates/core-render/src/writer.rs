//! Frame byte buffer.
//!
//! Every escape sequence and text byte of a frame is queued into one growable
//! buffer with crossterm commands and handed to the terminal in a single
//! write. Nothing reaches the terminal mid-frame.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Writer {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            buf: Vec::with_capacity(n),
        }
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.buf, Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.buf, Show)
    }

    /// Zero-based column `x`, row `y`.
    pub fn move_to(&mut self, x: usize, y: usize) -> io::Result<()> {
        queue!(self.buf, MoveTo(cell(x), cell(y)))
    }

    /// Erase from the cursor to the end of the line.
    pub fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.buf, Clear(ClearType::UntilNewLine))
    }

    pub fn fg(&mut self, color: Color) -> io::Result<()> {
        queue!(self.buf, SetForegroundColor(color))
    }

    pub fn reverse(&mut self) -> io::Result<()> {
        queue!(self.buf, SetAttribute(Attribute::Reverse))
    }

    pub fn reset_attributes(&mut self) -> io::Result<()> {
        queue!(self.buf, SetAttribute(Attribute::Reset))
    }

    /// Raw bytes, passed through untouched.
    pub fn print(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn newline(&mut self) {
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Single write of the whole frame, then flush.
    pub fn flush_to<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.buf)?;
        out.flush()
    }
}
