//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether keystrokes drive navigation or go into a focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NewItem,
    EditItem,
    DeleteItem,
    BeginEdit,
    Submit,
    Refresh,
    RefreshItem,
    OpenHelp,
    OpenSearch,
    CycleStatus,
    CycleAgent,
    ClearFilters,
    UpdateStatus,
    Export,
    Confirm,
    Cancel,
    NextField,
    PrevField,
    Input(KeyEvent),
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    match mode {
        InputMode::Normal => map_normal(event),
        InputMode::Editing => map_editing(event),
    }
}

fn map_normal(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('i') => Some(Action::BeginEdit),
        KeyCode::Char('s') => Some(Action::Submit),
        KeyCode::Char('r') => Some(Action::RefreshItem),
        KeyCode::Char('f') => Some(Action::CycleStatus),
        KeyCode::Char('a') => Some(Action::CycleAgent),
        KeyCode::Char('c') => Some(Action::ClearFilters),
        KeyCode::Char('u') => Some(Action::UpdateStatus),
        KeyCode::Char('x') => Some(Action::Export),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Char(c @ '1'..='3') => Some(Action::SwitchView(c as usize - '1' as usize)),
        _ => None,
    }
}

fn map_editing(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('c') => return Some(Action::Quit),
            KeyCode::Char('s') => return Some(Action::Submit),
            _ => {}
        }
    }

    match code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Enter => Some(Action::Confirm),
        _ => Some(Action::Input(event)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_are_commands_in_normal_mode_and_text_in_editing_mode() {
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Normal), Some(Action::Quit));
        let typed = key(KeyCode::Char('q'));
        assert_eq!(map_key(typed, InputMode::Editing), Some(Action::Input(typed)));
    }

    #[test]
    fn ctrl_s_submits_only_while_editing() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_s, InputMode::Editing), Some(Action::Submit));
        assert_eq!(map_key(ctrl_s, InputMode::Normal), None);
    }

    #[test]
    fn tab_switches_views_or_fields_depending_on_mode() {
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Normal), Some(Action::NextView));
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Editing), Some(Action::NextField));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, InputMode::Normal), Some(Action::Quit));
        assert_eq!(map_key(ctrl_c, InputMode::Editing), Some(Action::Quit));
    }
}
