use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    forms::{Form, FormState},
    ui::theme::Theme,
};

/// Rows used by one field: label, value, error.
pub const FIELD_HEIGHT: u16 = 3;

/// Renders every field of `state` top to bottom inside `area`.
pub fn render_fields<F: Form>(frame: &mut Frame<'_>, area: Rect, state: &FormState<F>, theme: &Theme) {
    let rows = Layout::vertical(F::FIELDS.iter().map(|_| Constraint::Length(FIELD_HEIGHT)))
        .split(area);
    let focused = state.focused();

    for (field, row) in F::FIELDS.iter().zip(rows.iter()) {
        let value = state.form.value(*field);
        let masked = field.is_secret() && !state.reveal_secrets;
        render_input(
            frame,
            *row,
            field.label(),
            value,
            masked,
            *field == focused,
            state.errors.get(*field),
            theme,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    masked: bool,
    focused: bool,
    error: Option<&str>,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if masked {
        mask(value)
    } else {
        value.to_string()
    };
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let marker = if focused { "› " } else { "  " };

    let lines = vec![
        Line::from(Span::styled(
            format!("  {label}"),
            Style::default().fg(theme.text_muted),
        )),
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{shown}{cursor}"), value_style),
        ]),
        Line::from(Span::styled(
            error.map(|message| format!("  {message}")).unwrap_or_default(),
            Style::default().fg(theme.error),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// One bullet per character.
fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_counts_characters_not_bytes() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("pä55"), "••••");
    }
}
