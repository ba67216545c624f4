//! Dashboard aggregation.
//!
//! [`summarize`] turns a flat list of [`Record`]s into the three things the
//! dashboard shows: income/expense totals, the expense breakdown per category
//! and the trailing six-month trend.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::Money;

/// Number of calendar months in the trend window, current month included.
pub const TREND_MONTHS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

/// One transaction as the aggregator sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub kind: EntryKind,
    /// Non-negative magnitude.
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub total_income: Money,
    pub total_expense: Money,
    pub current_balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: Money,
}

/// Expense totals per category, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    fn add(&mut self, name: &str, amount: Money) {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal {
                name: name.to_string(),
                amount,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|entry| entry.amount).sum()
    }
}

/// A `(year, month)` pair, ordered chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `MMM YYYY`, e.g. `Oct 2026`.
    pub fn label(self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%b %Y").to_string(),
            None => format!("{:02}/{}", self.month, self.year),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendBucket {
    pub month: MonthKey,
    pub income: Money,
    pub expense: Money,
}

/// Always exactly [`TREND_MONTHS`] buckets, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendSeries {
    buckets: Vec<TrendBucket>,
}

impl TrendSeries {
    /// Empty window ending with the month of `today`.
    pub fn ending_at(today: NaiveDate) -> Self {
        let mut month = MonthKey::of(today);
        let mut buckets = Vec::with_capacity(TREND_MONTHS);
        for _ in 0..TREND_MONTHS {
            buckets.push(TrendBucket {
                month,
                income: Money::ZERO,
                expense: Money::ZERO,
            });
            month = month.previous();
        }
        buckets.reverse();
        Self { buckets }
    }

    pub fn buckets(&self) -> &[TrendBucket] {
        &self.buckets
    }

    fn bucket_mut(&mut self, month: MonthKey) -> Option<&mut TrendBucket> {
        self.buckets.iter_mut().find(|bucket| bucket.month == month)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub metrics: Metrics,
    pub categories: CategoryBreakdown,
    pub trend: TrendSeries,
}

impl DashboardSummary {
    /// The zero state shown before the first successful load.
    pub fn empty(today: NaiveDate) -> Self {
        summarize(&[], today)
    }
}

/// Aggregates `records` for the dashboard.
///
/// Totals cover every record. The trend only covers records whose month falls
/// in the [`TREND_MONTHS`] calendar months ending with the month of `today`;
/// older and future-dated records are left out of every bucket.
pub fn summarize(records: &[Record], today: NaiveDate) -> DashboardSummary {
    let mut metrics = Metrics::default();
    let mut categories = CategoryBreakdown::default();
    let mut trend = TrendSeries::ending_at(today);

    for record in records {
        let bucket = trend.bucket_mut(MonthKey::of(record.date));
        match record.kind {
            EntryKind::Income => {
                metrics.total_income += record.amount;
                if let Some(bucket) = bucket {
                    bucket.income += record.amount;
                }
            }
            EntryKind::Expense => {
                metrics.total_expense += record.amount;
                categories.add(&record.category, record.amount);
                if let Some(bucket) = bucket {
                    bucket.expense += record.amount;
                }
            }
        }
    }

    metrics.current_balance = metrics.total_income - metrics.total_expense;

    DashboardSummary {
        metrics,
        categories,
        trend,
    }
}
