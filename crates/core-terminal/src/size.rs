//! Window size query.
//!
//! The size ioctl (through crossterm) is tried first. When it fails or
//! reports zero columns, the cursor is pushed to the bottom-right corner and
//! the terminal is asked where it ended up: `ESC [ 6 n` is answered with
//! `ESC [ rows ; cols R` on the input stream.

use anyhow::{Context, Result, anyhow};
use core_input::ByteSource;
use crossterm::{
    cursor::{MoveDown, MoveRight},
    queue,
};
use std::io::Write;
use std::time::Duration;
use tracing::debug;

const REPORT_MAX: usize = 32;
const REPLY_TIMEOUT: Duration = Duration::from_millis(500);

/// `(cols, rows)` of the terminal.
pub fn window_size<S, W>(src: &mut S, out: &mut W) -> Result<(u16, u16)>
where
    S: ByteSource + ?Sized,
    W: Write,
{
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => {
            debug!(target: "terminal", cols, rows, "size");
            return Ok((cols, rows));
        }
        Ok(_) => debug!(target: "terminal", "size ioctl reported zero columns"),
        Err(e) => debug!(target: "terminal", error = %e, "size ioctl failed"),
    }
    query_cursor_report(src, out)
}

/// Fallback: move to the far corner and parse the cursor position report.
pub fn query_cursor_report<S, W>(src: &mut S, out: &mut W) -> Result<(u16, u16)>
where
    S: ByteSource + ?Sized,
    W: Write,
{
    queue!(out, MoveRight(999), MoveDown(999)).context("move cursor to corner")?;
    out.write_all(b"\x1b[6n")?;
    out.flush()?;

    let mut reply = Vec::with_capacity(REPORT_MAX);
    while reply.len() < REPORT_MAX - 1 {
        match src.read_byte(REPLY_TIMEOUT)? {
            Some(b'R') | None => break,
            Some(b) => reply.push(b),
        }
    }
    let size = parse_cursor_report(&reply)
        .ok_or_else(|| anyhow!("unreadable cursor position report ({} bytes)", reply.len()))?;
    debug!(target: "terminal", cols = size.0, rows = size.1, "size from cursor report");
    Ok(size)
}

/// Parse `ESC [ rows ; cols` (an optional trailing `R` is accepted) into `(cols, rows)`.
pub fn parse_cursor_report(reply: &[u8]) -> Option<(u16, u16)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((cols.parse().ok()?, rows.parse().ok()?))
}
