//! Key handling: translate decoded keys into `Action`s and apply them.
//!
//! `translate_key` is a pure mapping from the current mode and one key to an
//! action. `dispatch` applies the action to the model. `handle_key` chains the
//! two for the runtime and for scripted tests.
//!
//! File IO lives in `io_ops`: loading is fatal on failure, saving reports a
//! typed `PersistError` that the dispatcher turns into a status message.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{PersistError, open_file, save};
pub use key_translator::translate_key;

use core_events::KeyToken;
use core_model::{EditorModel, Movement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Movement),
    /// Insert one byte at the cursor.
    InsertByte(u8),
    InsertNewline,
    /// Backspace / Ctrl-H.
    DeleteBack,
    /// Delete key: step right, then delete back.
    DeleteForward,
    Save,
    Quit,
    Find,
    /// Ctrl-L and Esc in normal mode; no effect besides a redraw.
    Refresh,
    Prompt(PromptInput),
}

/// Keys as the message bar prompt sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Backspace,
    Cancel,
    Submit,
    Char(u8),
    /// Arrow keys steer an incremental search.
    Arrow(Movement),
    /// Anything else; still runs the per-key callback.
    Other,
}

/// Translate and apply one key.
pub fn handle_key(key: KeyToken, model: &mut EditorModel) -> DispatchResult {
    let action = translate_key(&model.state().mode, key);
    dispatch(action, model)
}
