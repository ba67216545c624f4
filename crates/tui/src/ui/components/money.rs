use api_types::transaction::{Transaction, TransactionType};
use engine::{Currency, Money};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Amount of a listed transaction: `+$12.50` in green for income, `-$12.50`
/// in red for expenses.
///
/// An amount that does not parse is shown as the server sent it.
#[must_use]
pub fn transaction_amount(tx: &Transaction, currency: Currency, theme: &Theme) -> Span<'static> {
    let (sign, color) = match tx.kind {
        TransactionType::Income => ("+", theme.income),
        TransactionType::Expense => ("-", theme.expense),
    };
    let text = match Money::parse(tx.amount.as_str(), currency) {
        Ok(amount) => amount.abs().format(currency),
        Err(_) => tx.amount.as_str().to_string(),
    };

    Span::styled(format!("{sign}{text}"), Style::default().fg(color))
}

/// Bold amount for totals.
#[must_use]
pub fn styled_amount_bold(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.expense
    } else {
        theme.text
    };
    Span::styled(
        amount.format(currency),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use api_types::Amount;
    use chrono::NaiveDate;

    use super::*;

    fn tx(kind: TransactionType, amount: &str) -> Transaction {
        Transaction {
            id: api_types::Identifier::new("1"),
            title: "Lunch".to_string(),
            amount: Amount::new(amount),
            kind,
            category: None,
            date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        }
    }

    #[test]
    fn income_and_expense_get_their_sign() {
        let theme = Theme::default();
        let income = transaction_amount(&tx(TransactionType::Income, "12.5"), Currency::Usd, &theme);
        assert_eq!(income.content, "+$12.50");
        assert_eq!(income.style.fg, Some(theme.income));

        let expense = transaction_amount(&tx(TransactionType::Expense, "7"), Currency::Usd, &theme);
        assert_eq!(expense.content, "-$7.00");
        assert_eq!(expense.style.fg, Some(theme.expense));
    }

    #[test]
    fn unparsable_amount_is_shown_raw() {
        let theme = Theme::default();
        let span = transaction_amount(&tx(TransactionType::Expense, "n/a"), Currency::Usd, &theme);
        assert_eq!(span.content, "-n/a");
    }
}
