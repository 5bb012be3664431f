//! Keybindings. Home: Enter/s start, j/k scroll, q quit. Chat: Enter submit,
//! Esc back, Up/Down history, PgUp/PgDn scroll, Ctrl+L clear. Ctrl+C quits.

use crate::actions::Action;
use crate::state::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);
/// Poll interval while something animates.
pub const FRAME_RATE: Duration = Duration::from_millis(16);

pub fn key_to_action(event: &KeyEvent, screen: Screen) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);

    if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match screen {
        Screen::Home => home_action(code, mods),
        Screen::Chat => chat_action(code, mods),
    }
}

fn home_action(code: KeyCode, mods: KeyModifiers) -> Option<Action> {
    if !mods.is_empty() && mods != KeyModifiers::SHIFT {
        return None;
    }
    match code {
        KeyCode::Enter | KeyCode::Char('s') => Some(Action::StartChat),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::HomeScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::HomeScrollUp),
        _ => None,
    }
}

fn chat_action(code: KeyCode, mods: KeyModifiers) -> Option<Action> {
    if code == KeyCode::Char('l') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::ClearInput);
    }
    if code == KeyCode::End && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::ChatScrollBottom);
    }

    match code {
        KeyCode::Esc => return Some(Action::BackHome),
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Backspace => return Some(Action::Backspace),
        KeyCode::Delete => return Some(Action::Delete),
        KeyCode::Left => return Some(Action::CursorLeft),
        KeyCode::Right => return Some(Action::CursorRight),
        KeyCode::Home => return Some(Action::CursorHome),
        KeyCode::End => return Some(Action::CursorEnd),
        KeyCode::Up if mods.contains(KeyModifiers::SHIFT) => return Some(Action::ChatScrollUp),
        KeyCode::Down if mods.contains(KeyModifiers::SHIFT) => return Some(Action::ChatScrollDown),
        KeyCode::Up => return Some(Action::HistoryUp),
        KeyCode::Down => return Some(Action::HistoryDown),
        KeyCode::PageUp => return Some(Action::ChatScrollPageUp),
        KeyCode::PageDown => return Some(Action::ChatScrollPageDown),
        _ => {}
    }

    // Any other character goes to input (allow Alt for accented chars; only block Ctrl/Cmd).
    if let KeyCode::Char(c) = code {
        if !mods.contains(KeyModifiers::CONTROL) && !mods.contains(KeyModifiers::SUPER) {
            return Some(Action::Char(c));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_home_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_to_action(&key(KeyCode::Enter, none), Screen::Home), Some(Action::StartChat));
        assert_eq!(key_to_action(&key(KeyCode::Char('s'), none), Screen::Home), Some(Action::StartChat));
        assert_eq!(key_to_action(&key(KeyCode::Char('q'), none), Screen::Home), Some(Action::Quit));
        assert_eq!(key_to_action(&key(KeyCode::Char('j'), none), Screen::Home), Some(Action::HomeScrollDown));
        assert_eq!(key_to_action(&key(KeyCode::Char('x'), none), Screen::Home), None);
    }

    #[test]
    fn test_chat_letters_go_to_input() {
        let none = KeyModifiers::NONE;
        for c in ['q', 's', 'j', 'k', '/'] {
            assert_eq!(key_to_action(&key(KeyCode::Char(c), none), Screen::Chat), Some(Action::Char(c)));
        }
        assert_eq!(
            key_to_action(&key(KeyCode::Char('A'), KeyModifiers::SHIFT), Screen::Chat),
            Some(Action::Char('A'))
        );
        assert_eq!(key_to_action(&key(KeyCode::Esc, none), Screen::Chat), Some(Action::BackHome));
        assert_eq!(key_to_action(&key(KeyCode::Enter, none), Screen::Chat), Some(Action::Submit));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(&ctrl_c, Screen::Home), Some(Action::Quit));
        assert_eq!(key_to_action(&ctrl_c, Screen::Chat), Some(Action::Quit));
        let ctrl_l = key(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(&ctrl_l, Screen::Chat), Some(Action::ClearInput));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(&release, Screen::Chat), None);
    }
}
