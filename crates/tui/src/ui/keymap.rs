use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Back,
    NextField,
    PrevField,
    Submit,
    Backspace,
    ToggleReveal,
    GoRegister,
    GoForgotPassword,
    Refresh,
    Logout,
    Input(char),
    None,
}

/// Which key set applies: forms take printable characters as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Form,
    Dashboard,
}

pub fn map_key(key: KeyEvent, context: KeyContext) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('r') if context == KeyContext::Form => AppAction::GoRegister,
            KeyCode::Char('f') if context == KeyContext::Form => AppAction::GoForgotPassword,
            KeyCode::Char('s') if context == KeyContext::Form => AppAction::ToggleReveal,
            _ => AppAction::None,
        };
    }

    match context {
        KeyContext::Form => match key.code {
            KeyCode::Esc => AppAction::Back,
            KeyCode::Tab | KeyCode::Down => AppAction::NextField,
            KeyCode::BackTab | KeyCode::Up => AppAction::PrevField,
            KeyCode::Enter => AppAction::Submit,
            KeyCode::Backspace => AppAction::Backspace,
            KeyCode::Char(ch) => AppAction::Input(ch),
            _ => AppAction::None,
        },
        KeyContext::Dashboard => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('r') => AppAction::Refresh,
            KeyCode::Char('l') => AppAction::Logout,
            _ => AppAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_are_input_on_forms() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), KeyContext::Form),
            AppAction::Input('q')
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q')), KeyContext::Dashboard),
            AppAction::Quit
        );
    }

    #[test]
    fn control_shortcuts_only_apply_to_forms() {
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_r, KeyContext::Form), AppAction::GoRegister);
        assert_eq!(map_key(ctrl_r, KeyContext::Dashboard), AppAction::None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, KeyContext::Form), AppAction::Quit);
    }

    #[test]
    fn back_tab_moves_focus_backwards() {
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(map_key(back_tab, KeyContext::Form), AppAction::PrevField);
    }
}
