use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel with an accent title, used for every dashboard section.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }

    pub fn block(&self) -> Block<'a> {
        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// Card holding one headline figure.
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    value_color: Color,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.into(),
            value_color: theme.text,
            theme,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.value_color = color;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let value = Line::from(Span::styled(
            self.value.clone(),
            Style::default()
                .fg(self.value_color)
                .add_modifier(Modifier::BOLD),
        ));
        Card::new(self.title, self.theme).render_with(frame, area, Paragraph::new(value));
    }
}
