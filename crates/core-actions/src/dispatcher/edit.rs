//! Text edits at the cursor.
//!
//! The cursor may sit on the virtual row past the end (`cy == num_rows`).
//! Typing there appends a row first; deleting there does nothing.

use core_model::View;
use core_state::EditorState;
use tracing::trace;

pub(super) fn insert_char(state: &mut EditorState, view: &mut View, byte: u8) {
    let doc = &mut state.document;
    if view.cy == doc.num_rows() {
        doc.insert_row(doc.num_rows(), Vec::new());
    }
    doc.insert_char(view.cy, view.cx, byte);
    view.cx += 1;
    trace!(target: "actions.dispatch", op = "insert_char", byte, cx = view.cx, cy = view.cy, "edit");
}

pub(super) fn insert_newline(state: &mut EditorState, view: &mut View) {
    let doc = &mut state.document;
    if view.cx == 0 {
        doc.insert_row(view.cy, Vec::new());
    } else {
        doc.split_row(view.cy, view.cx);
    }
    view.cy += 1;
    view.cx = 0;
    trace!(target: "actions.dispatch", op = "insert_newline", cy = view.cy, "edit");
}

/// Backspace: remove the byte left of the cursor, or join this row onto the
/// previous one when the cursor is in column 0.
pub(super) fn delete_char(state: &mut EditorState, view: &mut View) {
    let doc = &mut state.document;
    if view.cy == doc.num_rows() || (view.cx == 0 && view.cy == 0) {
        return;
    }
    if view.cx > 0 {
        doc.delete_char(view.cy, view.cx - 1);
        view.cx -= 1;
    } else {
        let Some(tail) = doc.row(view.cy).map(|r| r.chars().to_vec()) else {
            return;
        };
        view.cx = doc.row(view.cy - 1).map_or(0, |r| r.size());
        doc.append_string(view.cy - 1, &tail);
        doc.delete_row(view.cy);
        view.cy -= 1;
    }
    trace!(target: "actions.dispatch", op = "delete_char", cx = view.cx, cy = view.cy, "edit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Layout;
    use core_text::Document;
    use pretty_assertions::assert_eq;

    fn setup(lines: &[&str]) -> (EditorState, View) {
        let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8);
        (EditorState::new(doc), View::new(Layout::new(80, 24)))
    }

    fn rows(state: &EditorState) -> Vec<String> {
        state
            .document
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
            .collect()
    }

    #[test]
    fn typing_into_empty_document_appends_row() {
        let (mut s, mut v) = setup(&[]);
        insert_char(&mut s, &mut v, b'h');
        insert_char(&mut s, &mut v, b'i');
        assert_eq!(rows(&s), vec!["hi"]);
        assert_eq!((v.cx, v.cy), (2, 0));
        assert!(s.document.is_dirty());
    }

    #[test]
    fn newline_at_column_zero_inserts_row_above() {
        let (mut s, mut v) = setup(&["abc"]);
        insert_newline(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["", "abc"]);
        assert_eq!((v.cx, v.cy), (0, 1));
    }

    #[test]
    fn newline_mid_row_splits() {
        let (mut s, mut v) = setup(&["abcd"]);
        v.cx = 2;
        insert_newline(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["ab", "cd"]);
        assert_eq!((v.cx, v.cy), (0, 1));
    }

    #[test]
    fn delete_at_document_start_is_noop() {
        let (mut s, mut v) = setup(&["abc"]);
        delete_char(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["abc"]);
        assert!(!s.document.is_dirty());
    }

    #[test]
    fn delete_on_virtual_row_is_noop() {
        let (mut s, mut v) = setup(&["abc"]);
        v.cy = 1;
        delete_char(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["abc"]);
        assert_eq!((v.cx, v.cy), (0, 1));
    }

    #[test]
    fn delete_removes_byte_left_of_cursor() {
        let (mut s, mut v) = setup(&["abc"]);
        v.cx = 2;
        delete_char(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["ac"]);
        assert_eq!(v.cx, 1);
    }

    #[test]
    fn delete_at_column_zero_merges_rows() {
        let (mut s, mut v) = setup(&["ab", "cd", "ef"]);
        v.cy = 1;
        delete_char(&mut s, &mut v);
        assert_eq!(rows(&s), vec!["abcd", "ef"]);
        assert_eq!((v.cx, v.cy), (2, 0));
        assert_eq!(s.document.row(1).unwrap().idx(), 1);
    }
}
