//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `edit`   - text mutation (insert/delete/newline)
//! * `prompt` - message bar input and the save-as / incremental find commands
//!
//! Every action except `Quit` re-arms the quit countdown, so a dirty document
//! needs `quit_times` consecutive Ctrl-Q presses before the editor exits.

use crate::io_ops::{self, PersistError};
use crate::Action;
use core_model::EditorModel;
use core_state::{EditorState, FindSession, Mode, Prompt, PromptKind};
use tracing::{debug, trace};

mod edit;
mod prompt;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self { quit: false }
    }

    pub fn quit() -> Self {
        Self { quit: true }
    }
}

pub fn dispatch(action: Action, model: &mut EditorModel) -> DispatchResult {
    trace!(target: "actions.dispatch", ?action, "dispatch");
    let (state, view) = model.split_mut();

    if action == Action::Quit {
        return handle_quit(state);
    }
    state.reset_quit_countdown();

    match action {
        Action::Move(m) => view.move_cursor(&state.document, m),
        Action::InsertByte(b) => edit::insert_char(state, view, b),
        Action::InsertNewline => edit::insert_newline(state, view),
        Action::DeleteBack => edit::delete_char(state, view),
        Action::DeleteForward => {
            view.move_cursor(&state.document, core_model::Movement::Right);
            edit::delete_char(state, view);
        }
        Action::Save => {
            if state.document.filename().is_some() {
                save_and_report(state);
            } else {
                state.mode = Mode::Prompt(Prompt::new(PromptKind::SaveAs));
            }
        }
        Action::Find => {
            let session = FindSession::new(view.snapshot());
            state.mode = Mode::Prompt(Prompt::new(PromptKind::Find(session)));
        }
        Action::Prompt(input) => prompt::handle_input(input, state, view),
        Action::Refresh | Action::Quit => {}
    }
    DispatchResult::clean()
}

fn handle_quit(state: &mut EditorState) -> DispatchResult {
    if state.document.is_dirty()
        && let Some(left) = state.take_quit_press()
    {
        debug!(target: "actions.dispatch", left, "quit_refused_dirty");
        state.set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {left} more times to quit."
        ));
        return DispatchResult::clean();
    }
    debug!(target: "actions.dispatch", "quit");
    DispatchResult::quit()
}

/// Save to the current file name and put the outcome in the status bar.
pub(crate) fn save_and_report(state: &mut EditorState) {
    match io_ops::save(&mut state.document) {
        Ok(n) => state.set_status(format!("{n} bytes written to disk")),
        Err(PersistError::NoFileName) => state.set_status("Can't save! No file name"),
        Err(PersistError::Io(e)) => state.set_status(format!("Can't save! I/O error: {e}")),
    }
}
