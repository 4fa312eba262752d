//! Built-in language profiles and the per-row highlight scanner.
//!
//! A `Syntax` is a static rule set (keywords, comment delimiters, feature
//! flags) picked from `SYNTAXES` by file name. The scanner in `highlight`
//! classifies every render column of a row into a `Highlight` category; the
//! mapping from category to terminal color belongs to the renderer.

pub mod highlight;
pub use highlight::{HighlightOutcome, highlight_line, is_separator};

use std::path::Path;
use tracing::debug;

/// Classification of a single render column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Current search match (temporary overlay written by find).
    Match,
}

/// Marker byte terminating a class-2 keyword in `Syntax::keywords`.
pub const KEYWORD2_MARKER: u8 = b'|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxFlags {
    pub numbers: bool,
    pub strings: bool,
}

#[derive(Debug)]
pub struct Syntax {
    /// Display name shown in the status bar.
    pub file_type: &'static str,
    /// `.ext` patterns match the extension exactly; anything else is a substring match.
    pub file_match: &'static [&'static str],
    /// Keywords; a trailing `|` puts the keyword in the second class.
    pub keywords: &'static [&'static str],
    pub single_line_comment: &'static str,
    pub block_comment: (&'static str, &'static str),
    pub flags: SyntaxFlags,
}

const ALL: SyntaxFlags = SyntaxFlags {
    numbers: true,
    strings: true,
};

pub static SYNTAXES: &[Syntax] = &[
    Syntax {
        file_type: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
            "float|", "char|", "unsigned|", "signed|", "void|",
        ],
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        flags: ALL,
    },
    Syntax {
        file_type: "rust",
        file_match: &[".rs"],
        keywords: &[
            "fn", "let", "mut", "if", "else", "match", "while", "loop", "for", "in", "return",
            "break", "continue", "struct", "enum", "impl", "trait", "pub", "use", "mod", "const",
            "static", "where", "unsafe", "i8|", "i16|", "i32|", "i64|", "u8|", "u16|", "u32|",
            "u64|", "usize|", "isize|", "f32|", "f64|", "bool|", "char|", "str|", "Self|",
        ],
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        flags: ALL,
    },
    Syntax {
        file_type: "python",
        file_match: &[".py"],
        keywords: &[
            "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from",
            "as", "with", "try", "except", "finally", "raise", "pass", "break", "continue",
            "lambda", "yield", "int|", "str|", "float|", "bool|", "list|", "dict|", "None|",
            "True|", "False|",
        ],
        single_line_comment: "#",
        block_comment: ("", ""),
        flags: ALL,
    },
];

impl Syntax {
    /// Does this profile claim `file_name`?
    pub fn matches(&self, file_name: &str) -> bool {
        let ext = file_name.rfind('.').map(|i| &file_name[i..]);
        self.file_match.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                file_name.contains(pat)
            }
        })
    }

    pub fn has_block_comments(&self) -> bool {
        !self.block_comment.0.is_empty() && !self.block_comment.1.is_empty()
    }
}

/// Pick the first registered profile matching the path's file name.
pub fn select_syntax(path: &Path) -> Option<&'static Syntax> {
    let name = path.to_string_lossy();
    let found = SYNTAXES.iter().find(|s| s.matches(&name));
    debug!(
        target: "syntax",
        file = %name,
        file_type = found.map(|s| s.file_type),
        "select"
    );
    found
}
