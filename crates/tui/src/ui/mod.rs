pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // info bar, content, bottom bar
    let [info_area, content_area, bottom_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_info_bar(frame, info_area, state, &theme);
    match state.screen {
        Screen::Login => screens::login::render(frame, content_area, state),
        Screen::Register => screens::register::render(frame, content_area, state),
        Screen::ForgotPassword => screens::forgot_password::render(frame, content_area, state),
        Screen::Dashboard => screens::dashboard::render(frame, content_area, state),
    }
    render_bottom_bar(frame, bottom_area, state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            "Finboard",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.screen.title(), Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
    ];

    if state.screen == Screen::Dashboard {
        let refresh = if state.loading {
            "loading…".to_string()
        } else {
            state
                .dashboard
                .last_refresh
                .map(|dt| dt.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        spans.push(Span::styled("Refresh", Style::default().fg(theme.text_muted)));
        spans.push(Span::raw(format!(": {refresh}")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_screen(state.screen);
    let bar = Paragraph::new(Line::from(components::hints::hints_to_spans(&hints, theme)));
    frame.render_widget(bar, area);
}
