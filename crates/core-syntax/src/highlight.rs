//! Single-pass highlight scanner.
//!
//! Input is one row's render bytes (tabs already expanded) plus whether the
//! previous row ended inside a block comment. The scan walks left to right
//! with one column of lookback (`prev_hl`) and a "previous byte was a
//! separator" flag. Precedence per column: line comment, block comment,
//! string, number, keyword, normal.
//!
//! The caller owns cross-row propagation: when `open_comment` differs from the
//! value stored on the row, the next row must be rescanned.

use crate::{Highlight, KEYWORD2_MARKER, Syntax};

const SEPARATORS: &[u8] = b",.()+-/*=~%<>[];";

/// Whitespace (space, `\t` through `\r`), NUL, or one of `,.()+-/*=~%<>[];`.
pub fn is_separator(c: u8) -> bool {
    c == 0 || matches!(c, b' ' | b'\t'..=b'\r') || SEPARATORS.contains(&c)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOutcome {
    /// One entry per render byte.
    pub hl: Vec<Highlight>,
    /// Row ends inside an unterminated block comment.
    pub open_comment: bool,
}

pub fn highlight_line(
    render: &[u8],
    syntax: Option<&Syntax>,
    starts_in_comment: bool,
) -> HighlightOutcome {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return HighlightOutcome {
            hl,
            open_comment: false,
        };
    };

    let scs = syntax.single_line_comment.as_bytes();
    let mcs = syntax.block_comment.0.as_bytes();
    let mce = syntax.block_comment.1.as_bytes();
    let block = syntax.has_block_comments();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && block;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };
        let rest = &render[i..];

        if !scs.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(scs) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if block && in_string.is_none() {
            if in_comment {
                if rest.starts_with(mce) {
                    hl[i..i + mce.len()].fill(Highlight::BlockComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            } else if rest.starts_with(mcs) {
                hl[i..i + mcs.len()].fill(Highlight::BlockComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.flags.strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = match_keyword(rest, syntax.keywords) {
            hl[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    HighlightOutcome {
        hl,
        open_comment: in_comment,
    }
}

/// Whole-word keyword match at the start of `rest`.
fn match_keyword(rest: &[u8], keywords: &[&str]) -> Option<(usize, Highlight)> {
    keywords.iter().find_map(|kw| {
        let kw = kw.as_bytes();
        let (word, class) = match kw.split_last() {
            Some((&KEYWORD2_MARKER, word)) => (word, Highlight::Keyword2),
            _ => (kw, Highlight::Keyword1),
        };
        if word.is_empty() || !rest.starts_with(word) {
            return None;
        }
        let next = rest.get(word.len()).copied().unwrap_or(0);
        is_separator(next).then_some((word.len(), class))
    })
}
