//! Screen compositor.
//!
//! Turns an `EditorModel` into the exact byte stream for one terminal frame.
//! There is no partial repaint: each refresh redraws every row, which keeps
//! the output a pure function of the model, the screen size and the clock.
//!
//! Components:
//! - `render_engine`: frame assembly (rows, status bar, message bar, cursor).
//! - `status`: status bar segments and layout.
//! - `style`: highlight category to terminal color.
//! - `writer`: the single per-frame byte buffer, filled with crossterm commands.

pub mod render_engine;
pub mod status;
pub mod style;
pub mod writer;

pub use render_engine::{RenderEngine, WELCOME};
pub use writer::Writer;
