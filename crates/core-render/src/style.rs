//! Highlight category to terminal color.

use core_syntax::Highlight;
use crossterm::style::Color;

/// Foreground color for a category. `Normal` maps to the terminal default.
pub fn highlight_color(hl: Highlight) -> Color {
    match hl {
        Highlight::Normal => Color::Reset,
        Highlight::Comment | Highlight::BlockComment => Color::DarkCyan,
        Highlight::Keyword1 => Color::DarkYellow,
        Highlight::Keyword2 => Color::DarkGreen,
        Highlight::String => Color::DarkMagenta,
        Highlight::Number => Color::DarkRed,
        Highlight::Match => Color::DarkBlue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_share_a_color() {
        assert_eq!(
            highlight_color(Highlight::Comment),
            highlight_color(Highlight::BlockComment)
        );
        assert_eq!(highlight_color(Highlight::Normal), Color::Reset);
        assert_ne!(
            highlight_color(Highlight::Match),
            highlight_color(Highlight::Keyword1)
        );
    }
}
