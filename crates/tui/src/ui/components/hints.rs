use ratatui::{style::Style, text::Span};

use crate::{app::Screen, ui::theme::Theme};

/// A key and what it does, shown in the bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

const FORM_EDITING: [KeyHint; 3] = [
    hint("Tab", "next"),
    hint("Enter", "submit"),
    hint("Ctrl+S", "show password"),
];

/// Hints for the given screen, most relevant first.
pub fn for_screen(screen: Screen) -> Vec<KeyHint> {
    let mut hints = Vec::new();
    match screen {
        Screen::Login => {
            hints.extend(FORM_EDITING);
            hints.push(hint("Ctrl+R", "sign up"));
            hints.push(hint("Ctrl+F", "forgot password"));
        }
        Screen::Register => {
            hints.extend(FORM_EDITING);
            hints.push(hint("Esc", "back to login"));
        }
        Screen::ForgotPassword => {
            hints.extend(&FORM_EDITING[..2]);
            hints.push(hint("Esc", "back to login"));
        }
        Screen::Dashboard => {
            hints.push(hint("r", "refresh"));
            hints.push(hint("l", "logout"));
        }
    }
    let quit = if screen == Screen::Dashboard { "q" } else { "Ctrl+C" };
    hints.push(hint(quit, "quit"));
    hints
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}
