//! Key to `Action` translation.
//!
//! Stateless: the result depends only on the mode and the key. Normal mode
//! binds the Ctrl chords and navigation keys; every other key, control bytes
//! such as Tab included, is inserted as text. In prompt mode every key becomes
//! a `PromptInput`.

use crate::{Action, PromptInput};
use core_events::{KeyToken, NamedKey, ctrl};
use core_model::Movement;
use core_state::Mode;

const CTRL_F: u8 = ctrl(b'f');
const CTRL_H: u8 = ctrl(b'h');
const CTRL_L: u8 = ctrl(b'l');
const CTRL_Q: u8 = ctrl(b'q');
const CTRL_S: u8 = ctrl(b's');

pub fn translate_key(mode: &Mode, key: KeyToken) -> Action {
    match mode {
        Mode::Normal => translate_normal(key),
        Mode::Prompt(_) => Action::Prompt(translate_prompt(key)),
    }
}

fn movement(key: NamedKey) -> Option<Movement> {
    Some(match key {
        NamedKey::Up => Movement::Up,
        NamedKey::Down => Movement::Down,
        NamedKey::Left => Movement::Left,
        NamedKey::Right => Movement::Right,
        NamedKey::Home => Movement::Home,
        NamedKey::End => Movement::End,
        NamedKey::PageUp => Movement::PageUp,
        NamedKey::PageDown => Movement::PageDown,
        _ => return None,
    })
}

fn translate_normal(key: KeyToken) -> Action {
    match key {
        KeyToken::Named(NamedKey::Enter) => Action::InsertNewline,
        KeyToken::Named(NamedKey::Backspace) => Action::DeleteBack,
        KeyToken::Named(NamedKey::Delete) => Action::DeleteForward,
        KeyToken::Named(NamedKey::Esc) => Action::Refresh,
        KeyToken::Named(named) => movement(named).map_or(Action::Refresh, Action::Move),
        KeyToken::Control(CTRL_Q) => Action::Quit,
        KeyToken::Control(CTRL_S) => Action::Save,
        KeyToken::Control(CTRL_F) => Action::Find,
        KeyToken::Control(CTRL_H) => Action::DeleteBack,
        KeyToken::Control(CTRL_L) => Action::Refresh,
        KeyToken::Control(b) | KeyToken::Char(b) => Action::InsertByte(b),
    }
}

fn translate_prompt(key: KeyToken) -> PromptInput {
    match key {
        KeyToken::Named(NamedKey::Backspace | NamedKey::Delete) | KeyToken::Control(CTRL_H) => {
            PromptInput::Backspace
        }
        KeyToken::Named(NamedKey::Esc) => PromptInput::Cancel,
        KeyToken::Named(NamedKey::Enter) => PromptInput::Submit,
        KeyToken::Named(
            named @ (NamedKey::Up | NamedKey::Down | NamedKey::Left | NamedKey::Right),
        ) => movement(named).map_or(PromptInput::Other, PromptInput::Arrow),
        KeyToken::Char(b) if b.is_ascii() => PromptInput::Char(b),
        _ => PromptInput::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{Prompt, PromptKind};

    fn prompt_mode() -> Mode {
        Mode::Prompt(Prompt::new(PromptKind::SaveAs))
    }

    #[test]
    fn normal_chords() {
        let m = Mode::Normal;
        assert_eq!(translate_key(&m, KeyToken::ctrl(b'q')), Action::Quit);
        assert_eq!(translate_key(&m, KeyToken::ctrl(b's')), Action::Save);
        assert_eq!(translate_key(&m, KeyToken::ctrl(b'f')), Action::Find);
        assert_eq!(translate_key(&m, KeyToken::ctrl(b'h')), Action::DeleteBack);
        assert_eq!(translate_key(&m, KeyToken::ctrl(b'l')), Action::Refresh);
    }

    #[test]
    fn normal_named_keys() {
        let m = Mode::Normal;
        let named = |k| translate_key(&m, KeyToken::Named(k));
        assert_eq!(named(NamedKey::Enter), Action::InsertNewline);
        assert_eq!(named(NamedKey::Backspace), Action::DeleteBack);
        assert_eq!(named(NamedKey::Delete), Action::DeleteForward);
        assert_eq!(named(NamedKey::Esc), Action::Refresh);
        assert_eq!(named(NamedKey::PageDown), Action::Move(Movement::PageDown));
        assert_eq!(named(NamedKey::Home), Action::Move(Movement::Home));
    }

    #[test]
    fn text_and_other_controls_insert() {
        let m = Mode::Normal;
        assert_eq!(translate_key(&m, KeyToken::Char(b'x')), Action::InsertByte(b'x'));
        assert_eq!(
            translate_key(&m, KeyToken::Control(b'\t')),
            Action::InsertByte(b'\t')
        );
    }

    #[test]
    fn prompt_keys() {
        let m = prompt_mode();
        let p = |k| translate_key(&m, k);
        assert_eq!(
            p(KeyToken::Named(NamedKey::Delete)),
            Action::Prompt(PromptInput::Backspace)
        );
        assert_eq!(p(KeyToken::ctrl(b'h')), Action::Prompt(PromptInput::Backspace));
        assert_eq!(
            p(KeyToken::Named(NamedKey::Esc)),
            Action::Prompt(PromptInput::Cancel)
        );
        assert_eq!(
            p(KeyToken::Named(NamedKey::Enter)),
            Action::Prompt(PromptInput::Submit)
        );
        assert_eq!(p(KeyToken::Char(b'a')), Action::Prompt(PromptInput::Char(b'a')));
        assert_eq!(
            p(KeyToken::Named(NamedKey::Left)),
            Action::Prompt(PromptInput::Arrow(Movement::Left))
        );
    }

    #[test]
    fn prompt_ignores_controls_and_high_bytes() {
        let m = prompt_mode();
        assert_eq!(
            translate_key(&m, KeyToken::Char(0xe9)),
            Action::Prompt(PromptInput::Other)
        );
        assert_eq!(
            translate_key(&m, KeyToken::Control(b'\t')),
            Action::Prompt(PromptInput::Other)
        );
        assert_eq!(
            translate_key(&m, KeyToken::Named(NamedKey::PageUp)),
            Action::Prompt(PromptInput::Other)
        );
    }
}
