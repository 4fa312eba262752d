use core_model::{EditorModel, Layout};
use core_render::RenderEngine;
use core_state::{EditorState, Mode, Prompt, PromptKind};
use core_syntax::SYNTAXES;
use core_text::Document;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn model(lines: &[&str], cols: u16, rows: u16) -> EditorModel {
    let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8);
    EditorModel::new(EditorState::new(doc), Layout::new(cols, rows))
}

fn render(m: &mut EditorModel, now: Instant) -> Vec<u8> {
    let mut out = Vec::new();
    RenderEngine::new().render(m, now, &mut out).unwrap();
    out
}

fn fg(color: Color) -> Vec<u8> {
    let mut v = Vec::new();
    queue!(v, SetForegroundColor(color)).unwrap();
    v
}

fn attr(a: Attribute) -> Vec<u8> {
    let mut v = Vec::new();
    queue!(v, SetAttribute(a)).unwrap();
    v
}

fn move_to(x: u16, y: u16) -> Vec<u8> {
    let mut v = Vec::new();
    queue!(v, MoveTo(x, y)).unwrap();
    v
}

fn count(hay: &[u8], needle: &[u8]) -> usize {
    hay.windows(needle.len()).filter(|w| *w == needle).count()
}

fn lines(frame: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(frame)
        .split("\r\n")
        .map(str::to_owned)
        .collect()
}

#[test]
fn frame_is_bracketed_by_cursor_hide_and_show() {
    let mut m = model(&["hello"], 20, 5);
    let out = render(&mut m, Instant::now());
    let mut start = Vec::new();
    queue!(start, Hide, MoveTo(0, 0)).unwrap();
    let mut end = move_to(0, 0);
    queue!(end, Show).unwrap();
    assert!(out.starts_with(&start));
    assert!(out.ends_with(&end));
}

#[test]
fn rows_past_end_show_tilde() {
    let mut m = model(&["only"], 20, 6);
    m.state_mut().document.set_filename(Some("f.txt".into()));
    let out = render(&mut m, Instant::now());
    let l = lines(&out);
    assert!(l[0].contains("only"));
    for row in &l[1..4] {
        assert!(row.starts_with('~'), "{row:?}");
    }
}

#[test]
fn no_welcome_once_named() {
    let mut m = model(&[], 80, 12);
    m.state_mut().document.set_filename(Some("new.c".into()));
    let out = String::from_utf8_lossy(&render(&mut m, Instant::now())).into_owned();
    assert!(!out.contains(core_render::WELCOME));
}

#[test]
fn color_escape_only_on_change() {
    let mut m = model(&["int x = 10;"], 40, 5);
    m.state_mut().document.set_syntax(Some(&SYNTAXES[0]));
    let out = render(&mut m, Instant::now());
    let keyword2 = fg(Color::DarkGreen);
    let number = fg(Color::DarkRed);
    assert_eq!(count(&out, &keyword2), 1);
    assert_eq!(count(&out, &number), 1);
    let mut expect = keyword2.clone();
    expect.extend_from_slice(b"int");
    expect.extend(fg(Color::Reset));
    expect.extend_from_slice(b" x = ");
    expect.extend(number.clone());
    expect.extend_from_slice(b"10");
    expect.extend(fg(Color::Reset));
    expect.extend_from_slice(b";");
    assert_eq!(count(&out, &expect), 1);
}

#[test]
fn control_bytes_render_inverted_and_restore_color() {
    let mut m = model(&["\"a\x01b\""], 40, 5);
    m.state_mut().document.set_syntax(Some(&SYNTAXES[0]));
    let out = render(&mut m, Instant::now());
    let string = fg(Color::DarkMagenta);
    let mut expect = string.clone();
    expect.extend_from_slice(b"\"a");
    expect.extend(attr(Attribute::Reverse));
    expect.extend_from_slice(b"A");
    expect.extend(attr(Attribute::Reset));
    expect.extend(string);
    expect.extend_from_slice(b"b\"");
    assert_eq!(count(&out, &expect), 1);
}

#[test]
fn delete_byte_renders_question_mark() {
    let mut m = model(&["a\x7fb"], 40, 5);
    let out = render(&mut m, Instant::now());
    let mut expect = attr(Attribute::Reverse);
    expect.extend_from_slice(b"?");
    expect.extend(attr(Attribute::Reset));
    expect.extend_from_slice(b"b");
    assert_eq!(count(&out, &expect), 1);
}

#[test]
fn status_message_expires() {
    let mut m = model(&["x"], 40, 5);
    let t0 = Instant::now();
    m.state_mut().set_status_at("HELP: Ctrl-S = save", t0);
    let fresh = String::from_utf8_lossy(&render(&mut m, t0 + Duration::from_secs(1))).into_owned();
    assert!(fresh.contains("HELP: Ctrl-S = save"));
    let stale = String::from_utf8_lossy(&render(&mut m, t0 + Duration::from_secs(6))).into_owned();
    assert!(!stale.contains("HELP"));
}

#[test]
fn prompt_text_replaces_status_message() {
    let mut m = model(&["x"], 60, 5);
    let mut prompt = Prompt::new(PromptKind::SaveAs);
    prompt.push(b'o');
    m.state_mut().mode = Mode::Prompt(prompt);
    let out = String::from_utf8_lossy(&render(&mut m, Instant::now())).into_owned();
    assert!(out.contains("Save as: o (ESC to cancel)"));
}

#[test]
fn status_bar_is_reverse_video() {
    let mut m = model(&["a", "b"], 40, 5);
    m.state_mut().document.set_filename(Some("two.txt".into()));
    let out = render(&mut m, Instant::now());
    let mut expect = attr(Attribute::Reverse);
    expect.extend_from_slice(b"two.txt - 2 lines ");
    assert_eq!(count(&out, &expect), 1);
    assert_eq!(count(&out, b"no ft | 1/2"), 1);
}

#[test]
fn cursor_lands_on_render_column_relative_to_scroll() {
    let mut m = model(&["\tx"; 30], 40, 7);
    {
        let (state, view) = m.split_mut();
        view.cy = 10;
        view.cx = 1;
        view.clamp_cx(&state.document);
    }
    let out = render(&mut m, Instant::now());
    // five text rows: rowoff becomes 6, cursor on screen row 4, render column 8
    assert_eq!(m.view().rowoff, 6);
    let mut tail = move_to(8, 4);
    queue!(tail, Show).unwrap();
    assert!(out.ends_with(&tail));
}
