//! Client-side finance logic.
//!
//! Everything here is pure: no I/O, no clock. Callers hand in the records and
//! the reference date.

pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use summary::{
    CategoryBreakdown, CategoryTotal, DashboardSummary, EntryKind, Metrics, MonthKey, Record,
    TREND_MONTHS, TrendBucket, TrendSeries, summarize,
};

mod currency;
mod error;
mod money;
mod summary;
