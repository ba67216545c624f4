use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use crate::{Currency, EngineError};

/// Signed money amount represented as integer **minor units** (cents).
///
/// Every amount coming from the API is converted into this type before any
/// arithmetic, so totals and balances never drift the way `f64` sums do.
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Usd), "$12.34");
/// ```
///
/// Parsing a decimal string (accepts `.` or `,`, rejects digits beyond the
/// currency precision unless they are zeros):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert_eq!("10.500".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Formats with two-digit precision and the currency symbol, e.g.
    /// `$1200.00`, `-$60.00` or `12.34€`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let number = format_unsigned(self.0.unsigned_abs(), currency.minor_units());
        if currency.symbol_first() {
            format!("{sign}{}{number}", currency.symbol())
        } else {
            format!("{sign}{number}{}", currency.symbol())
        }
    }

    /// Parses a decimal string in major units into minor units of `currency`.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Fraction digits beyond the currency precision are accepted only when
    /// they are zeros (`"12.500"`), since the server may render a wider scale.
    pub fn parse(s: &str, currency: Currency) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {s:?}"));
        let overflow = || EngineError::InvalidAmount(format!("amount too large: {s:?}"));

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let precision = usize::from(currency.minor_units());
        let (kept, dropped) = fraction_str.split_at(fraction_str.len().min(precision));
        if dropped.chars().any(|c| c != '0') {
            return Err(EngineError::InvalidAmount(format!("too many decimals: {s:?}")));
        }

        let scale = 10i64.pow(u32::from(currency.minor_units()));
        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let mut fraction: i64 = if kept.is_empty() {
            0
        } else {
            kept.parse().map_err(|_| invalid())?
        };
        for _ in kept.len()..precision {
            fraction *= 10;
        }

        let total = major
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

fn format_unsigned(minor: u64, minor_units: u8) -> String {
    let scale = 10u64.pow(u32::from(minor_units));
    let major = minor / scale;
    let fraction = minor % scale;
    if minor_units == 0 {
        return major.to_string();
    }
    format!("{major}.{fraction:0width$}", width = usize::from(minor_units))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::default()))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses with the precision of the default currency.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s, Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_usd_and_eur() {
        assert_eq!(Money::new(0).format(Currency::Usd), "$0.00");
        assert_eq!(Money::new(1).format(Currency::Usd), "$0.01");
        assert_eq!(Money::new(120_000).format(Currency::Usd), "$1200.00");
        assert_eq!(Money::new(-6000).format(Currency::Usd), "-$60.00");
        assert_eq!(Money::new(1050).format(Currency::Eur), "10.50€");
        assert_eq!(Money::new(-1050).format(Currency::Eur), "-10.50€");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("7.".parse::<Money>().unwrap().minor(), 700);
    }

    #[test]
    fn parse_tolerates_trailing_zero_scale() {
        assert_eq!("40.5000".parse::<Money>().unwrap().minor(), 4050);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("1e3".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn sums_exactly() {
        let total: Money = ["0.10", "0.20", "0.30"]
            .iter()
            .map(|s| s.parse::<Money>().unwrap())
            .sum();
        assert_eq!(total, Money::new(60));
    }

    #[test]
    fn arithmetic_saturates_at_bounds() {
        let max = Money::new(i64::MAX);
        let min = Money::new(i64::MIN);

        assert_eq!(max + Money::new(1), max);
        assert_eq!(min - Money::new(1), min);
        assert_eq!(min.abs(), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let sum: Money = [max, max, Money::new(-5)].into_iter().sum();
        assert_eq!(sum, Money::new(i64::MAX - 5));
    }
}
