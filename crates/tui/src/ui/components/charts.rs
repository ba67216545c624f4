use engine::{Money, TrendSeries};
use ratatui::{
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
};

use crate::ui::theme::Theme;

/// Horizontal bar such as `████████░░░░` for `value` out of `max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Share of `part` in `total`, in whole percent.
#[must_use]
pub fn share_percent(part: Money, total: Money) -> u16 {
    if total.minor() <= 0 {
        return 0;
    }
    let ratio = part.minor().max(0) as f64 / total.minor() as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u16
}

/// Short whole-unit label that fits inside a bar: `850`, `1.2k`, `3.4M`.
#[must_use]
pub fn compact_amount(amount: Money) -> String {
    let units = amount.minor().unsigned_abs() / 100;
    let sign = if amount.is_negative() { "-" } else { "" };
    match units {
        0..1_000 => format!("{sign}{units}"),
        1_000..1_000_000 => format!("{sign}{:.1}k", units as f64 / 1_000.0),
        _ => format!("{sign}{:.1}M", units as f64 / 1_000_000.0),
    }
}

fn bar_height(amount: Money) -> u64 {
    u64::try_from(amount.minor()).unwrap_or(0)
}

/// Grouped income/expense bars, one group per trend month.
pub fn trend_chart(trend: &TrendSeries, theme: &Theme) -> BarChart<'static> {
    let mut chart = BarChart::default()
        .bar_width(4)
        .bar_gap(1)
        .group_gap(2)
        .label_style(Style::default().fg(theme.text_muted));

    for bucket in trend.buckets() {
        let bars = [
            Bar::default()
                .value(bar_height(bucket.income))
                .text_value(compact_amount(bucket.income))
                .style(Style::default().fg(theme.income))
                .value_style(
                    Style::default()
                        .fg(theme.background)
                        .bg(theme.income)
                        .add_modifier(Modifier::BOLD),
                ),
            Bar::default()
                .value(bar_height(bucket.expense))
                .text_value(compact_amount(bucket.expense))
                .style(Style::default().fg(theme.expense))
                .value_style(
                    Style::default()
                        .fg(theme.background)
                        .bg(theme.expense)
                        .add_modifier(Modifier::BOLD),
                ),
        ];
        let group = BarGroup::default()
            .label(Line::from(bucket.month.label()))
            .bars(&bars);
        chart = chart.data(group);
    }

    chart
}
