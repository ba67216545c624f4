pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod register;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{Notice, NoticeLevel},
    forms::{Form, FormState},
    ui::{
        components::input::{FIELD_HEIGHT, render_fields},
        theme::Theme,
    },
};

const FORM_WIDTH: u16 = 48;

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height.min(area.height)),
        Constraint::Min(0),
    ])
    .areas(area);
    let [_, cell, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width.min(area.width)),
        Constraint::Min(0),
    ])
    .areas(row);
    cell
}

/// Boxed form with a subtitle, an optional banner and the fields.
pub(crate) fn render_auth_form<F: Form>(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    subtitle: &str,
    state: &FormState<F>,
    notice: Option<&Notice>,
    theme: &Theme,
) {
    let fields_height = FIELD_HEIGHT * F::FIELDS.len() as u16;
    // two wrapped lines and a gap
    let notice_height = if notice.is_some() { 3 } else { 0 };
    // subtitle + blank, notice, fields, borders
    let height = 2 + notice_height + fields_height + 2;
    let card_area = centered_box(FORM_WIDTH, height, area);

    frame.render_widget(Clear, card_area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let [subtitle_area, notice_area, fields_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(notice_height),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(subtitle, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Center),
        subtitle_area,
    );

    if let Some(notice) = notice {
        let color = match notice.level {
            NoticeLevel::Success => theme.income,
            NoticeLevel::Error => theme.error,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                notice.message.as_str(),
                Style::default().fg(color),
            )))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
            notice_area,
        );
    }

    render_fields(frame, fields_area, state, theme);
}
