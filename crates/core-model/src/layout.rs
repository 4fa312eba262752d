//! Screen geometry.
//!
//! The terminal is split top to bottom into the text area, one status bar row
//! and one message row. Sizes are terminal cells.

/// Rows reserved below the text area.
pub const BAR_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Rows available for document text; zero on a terminal too small for the bars.
    pub fn text_rows(&self) -> usize {
        usize::from(self.rows.saturating_sub(BAR_ROWS))
    }

    pub fn text_cols(&self) -> usize {
        usize::from(self.cols)
    }
}
