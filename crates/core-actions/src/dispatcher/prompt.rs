//! Message bar prompt: line editing plus the per-key callbacks of the two
//! prompting commands.
//!
//! The prompt is taken out of `state.mode` for the duration of one key and
//! put back unless the key finished it, so the callbacks can borrow the
//! document and the view freely.
//!
//! Incremental find keeps its state in `FindSession`: the row of the last
//! match, the search direction, and the highlight the match overlay replaced.
//! The overlay is undone at the start of every callback, including the final
//! one for Enter or Esc, so no `Match` bytes survive the session.

use super::save_and_report;
use crate::PromptInput;
use core_model::{Movement, View};
use core_state::{EditorState, FindSession, Mode, Prompt, PromptKind, SearchDirection};
use core_syntax::{Highlight, select_syntax};
use std::path::PathBuf;
use tracing::debug;

pub(super) fn handle_input(input: PromptInput, state: &mut EditorState, view: &mut View) {
    let Mode::Prompt(mut prompt) = std::mem::take(&mut state.mode) else {
        return;
    };
    match input {
        PromptInput::Backspace => prompt.pop(),
        PromptInput::Cancel => {
            state.set_status("");
            callback(&mut prompt, input, state, view);
            cancel(prompt, state, view);
            return;
        }
        PromptInput::Submit if !prompt.input.is_empty() => {
            state.set_status("");
            callback(&mut prompt, input, state, view);
            submit(prompt, state);
            return;
        }
        PromptInput::Char(b) if b.is_ascii() && !b.is_ascii_control() => prompt.push(b),
        _ => {}
    }
    callback(&mut prompt, input, state, view);
    state.mode = Mode::Prompt(prompt);
}

fn callback(prompt: &mut Prompt, input: PromptInput, state: &mut EditorState, view: &mut View) {
    match &mut prompt.kind {
        PromptKind::SaveAs => {}
        PromptKind::Find(session) => find_step(session, &prompt.input, input, state, view),
    }
}

fn cancel(prompt: Prompt, state: &mut EditorState, view: &mut View) {
    match prompt.kind {
        PromptKind::SaveAs => state.set_status("Save aborted"),
        PromptKind::Find(session) => {
            view.restore(session.origin);
            debug!(target: "actions.find", cy = view.cy, "find_cancelled");
        }
    }
}

fn submit(prompt: Prompt, state: &mut EditorState) {
    match prompt.kind {
        PromptKind::SaveAs => {
            let path = PathBuf::from(String::from_utf8_lossy(&prompt.input).into_owned());
            let syntax = select_syntax(&path);
            state.document.set_filename(Some(path));
            state.document.set_syntax(syntax);
            save_and_report(state);
        }
        PromptKind::Find(session) => {
            debug!(target: "actions.find", last_match = ?session.last_match, "find_accepted");
        }
    }
}

/// One keystroke of incremental search.
fn find_step(
    session: &mut FindSession,
    query: &[u8],
    input: PromptInput,
    state: &mut EditorState,
    view: &mut View,
) {
    if let Some((row, saved)) = session.saved_hl.take()
        && let Some(hl) = state.document.highlight_mut(row)
    {
        let n = hl.len().min(saved.len());
        hl[..n].copy_from_slice(&saved[..n]);
    }

    match input {
        PromptInput::Submit | PromptInput::Cancel => {
            session.last_match = None;
            session.direction = SearchDirection::Forward;
            return;
        }
        PromptInput::Arrow(Movement::Right | Movement::Down) => {
            session.direction = SearchDirection::Forward;
        }
        PromptInput::Arrow(Movement::Left | Movement::Up) => {
            session.direction = SearchDirection::Backward;
        }
        _ => {
            session.last_match = None;
            session.direction = SearchDirection::Forward;
        }
    }
    if session.last_match.is_none() {
        session.direction = SearchDirection::Forward;
    }
    if query.is_empty() {
        return;
    }

    let doc = &mut state.document;
    let num_rows = doc.num_rows();
    let tab_stop = doc.tab_stop();
    let mut current = session.last_match;
    for _ in 0..num_rows {
        let next = match (current, session.direction) {
            (None, _) => 0,
            (Some(c), SearchDirection::Forward) => (c + 1) % num_rows,
            (Some(0), SearchDirection::Backward) => num_rows - 1,
            (Some(c), SearchDirection::Backward) => c - 1,
        };
        current = Some(next);
        let Some(row) = doc.row(next) else {
            break;
        };
        let Some(rx) = find_bytes(row.render(), query) else {
            continue;
        };
        session.last_match = Some(next);
        view.cy = next;
        view.cx = row.rx_to_cx(rx, tab_stop);
        view.rowoff = num_rows;
        if let Some(hl) = doc.highlight_mut(next) {
            session.saved_hl = Some((next, hl.to_vec()));
            let end = (rx + query.len()).min(hl.len());
            hl[rx..end].fill(Highlight::Match);
        }
        debug!(target: "actions.find", row = next, rx, direction = ?session.direction, "match");
        return;
    }
    debug!(target: "actions.find", query_len = query.len(), "no_match");
}

fn find_bytes(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}
