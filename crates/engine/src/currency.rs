use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency used to display amounts.
///
/// The API does not carry a currency per transaction, so the client picks one
/// for display and never converts between them.
///
/// ## Minor units
///
/// Amounts are held as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits separate major and minor
/// units, e.g. `10.50 USD` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Usd | Currency::Eur => 2,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Whether the symbol goes before the number (`$12.00`) or after (`12.00€`).
    #[must_use]
    pub const fn symbol_first(self) -> bool {
        match self {
            Currency::Usd => true,
            Currency::Eur => false,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
