use engine::{CategoryBreakdown, Currency, Metrics};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use api_types::transaction::Transaction;

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, share_percent, trend_chart},
            money::{styled_amount_bold, transaction_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let [metrics_area, charts_area, recent_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Length(9),
    ])
    .areas(area);

    render_metrics(frame, metrics_area, &state.dashboard.summary.metrics, state.currency, &theme);

    let [breakdown_area, trend_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(charts_area);
    render_breakdown(
        frame,
        breakdown_area,
        &state.dashboard.summary.categories,
        state.currency,
        &theme,
    );
    render_trend(frame, trend_area, state, &theme);
    render_recent(frame, recent_area, &state.dashboard.recent, state.currency, &theme);
}

fn render_metrics(
    frame: &mut Frame<'_>,
    area: Rect,
    metrics: &Metrics,
    currency: Currency,
    theme: &Theme,
) {
    let cols = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    StatCard::new("Total Income", metrics.total_income.format(currency), theme)
        .color(theme.income)
        .render(frame, cols[0]);
    StatCard::new("Total Expense", metrics.total_expense.format(currency), theme)
        .color(theme.expense)
        .render(frame, cols[1]);

    let balance_color = if metrics.current_balance.is_negative() {
        theme.expense
    } else {
        theme.text
    };
    StatCard::new(
        "Current Balance",
        metrics.current_balance.format(currency),
        theme,
    )
    .color(balance_color)
    .render(frame, cols[2]);
}

fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    categories: &CategoryBreakdown,
    currency: Currency,
    theme: &Theme,
) {
    let card = Card::new("Expenses by Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if categories.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses yet",
                Style::default().fg(theme.text_muted),
            )),
            inner,
        );
        return;
    }

    let total = categories.total();
    let max = categories
        .iter()
        .map(|entry| entry.amount.minor().max(0) as u64)
        .max()
        .unwrap_or(0);
    let name_width = categories
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);

    let mut lines: Vec<Line> = categories
        .iter()
        .enumerate()
        .take(inner.height.saturating_sub(2) as usize)
        .map(|(index, entry)| {
            let color = theme.slice(index);
            let name: String = entry.name.chars().take(name_width).collect();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{name:<name_width$} "),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    ascii_bar(entry.amount.minor().max(0) as u64, max, 10),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>3}% ", share_percent(entry.amount, total)),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(entry.amount.format(currency), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Total  ", Style::default().fg(theme.text_muted)),
        styled_amount_bold(total, currency, theme),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_trend(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Monthly Trend", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let [legend_area, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
    let legend = Line::from(vec![
        Span::styled("■ ", Style::default().fg(theme.income)),
        Span::raw("Income   "),
        Span::styled("■ ", Style::default().fg(theme.expense)),
        Span::raw("Expense"),
    ]);
    frame.render_widget(Paragraph::new(legend), legend_area);
    frame.render_widget(trend_chart(&state.dashboard.summary.trend, theme), chart_area);
}

fn render_recent(
    frame: &mut Frame<'_>,
    area: Rect,
    recent: &[Transaction],
    currency: Currency,
    theme: &Theme,
) {
    let card = Card::new("Recent Transactions", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if recent.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No transactions yet",
                Style::default().fg(theme.text_muted),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = recent
        .iter()
        .take(inner.height as usize)
        .map(|tx| {
            let date = tx.date.format("%b %-d, %Y").to_string();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{date:<14}"), Style::default().fg(theme.text_muted)),
                Span::styled(format!("{:<24}", tx.title), Style::default().fg(theme.text)),
                Span::styled(
                    format!("{:<16}", tx.category_name()),
                    Style::default().fg(theme.accent),
                ),
                transaction_amount(tx, currency, theme),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}
