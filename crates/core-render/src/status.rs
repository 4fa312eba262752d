//! Status bar composition.
//!
//! Two stages, so segments can be inspected in tests without parsing text:
//! 1. `compose_status` produces the left and right segment lists.
//! 2. `format_status` lays them out in exactly `width` columns: left text
//!    truncated to fit, space padding, and the right text flush against the
//!    right edge when it fits in the remaining space.
//!
//! Layout: `<name> - <N> lines [(modified)]` on the left, `<filetype> | <line>/<total>`
//! on the right. Names longer than 20 bytes are cut.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

pub const NAME_MAX: usize = 20;
pub const NO_NAME: &str = "[No Name]";
pub const NO_FILE_TYPE: &str = "no ft";

pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub num_rows: usize,
    pub dirty: bool,
    pub file_type: Option<&'a str>,
    /// 0-based cursor row.
    pub cy: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    /// Present only when the document has unsaved changes.
    Modified,
    FileType(&'a str),
    /// 1-based cursor row over the row count.
    Position { line_1: usize, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSegments<'a> {
    pub left: Vec<StatusSegment<'a>>,
    pub right: Vec<StatusSegment<'a>>,
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> StatusSegments<'a> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(p) => match p.to_string_lossy() {
            Cow::Borrowed(s) => Cow::Borrowed(truncate(s, NAME_MAX)),
            Cow::Owned(s) => Cow::Owned(truncate(&s, NAME_MAX).to_owned()),
        },
        None => Cow::Borrowed(NO_NAME),
    };
    let mut left = vec![StatusSegment::FileName(name), StatusSegment::LineCount(ctx.num_rows)];
    if ctx.dirty {
        left.push(StatusSegment::Modified);
    }
    let right = vec![
        StatusSegment::FileType(ctx.file_type.unwrap_or(NO_FILE_TYPE)),
        StatusSegment::Position {
            line_1: ctx.cy + 1,
            total: ctx.num_rows,
        },
    ];
    StatusSegments { left, right }
}

fn join(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(48);
    for seg in segments {
        // Writing into a String cannot fail.
        let _ = match seg {
            StatusSegment::FileName(name) => write!(s, "{name}"),
            StatusSegment::LineCount(n) => write!(s, " - {n} lines "),
            StatusSegment::Modified => write!(s, "(modified)"),
            StatusSegment::FileType(ft) => write!(s, "{ft}"),
            StatusSegment::Position { line_1, total } => write!(s, " | {line_1}/{total}"),
        };
    }
    s
}

/// Lay the bar out in `width` columns.
pub fn format_status(segments: &StatusSegments<'_>, width: usize) -> String {
    let left = join(&segments.left);
    let right = join(&segments.right);
    let mut out = String::with_capacity(width);
    out.push_str(truncate(&left, width));
    let mut len = out.len();
    while len < width {
        if width - len == right.len() {
            out.push_str(&right);
            break;
        }
        out.push(' ');
        len += 1;
    }
    out
}

pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    format_status(&compose_status(ctx), width)
}

/// Longest prefix of at most `max` bytes ending on a char boundary.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
