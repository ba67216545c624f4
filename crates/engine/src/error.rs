//! The module contains the errors the engine can return.
//!
//! - [`InvalidAmount`] when a decimal string cannot be turned into [`Money`].
//! - [`UnsupportedCurrency`] when a currency code is unknown.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`UnsupportedCurrency`]: EngineError::UnsupportedCurrency
//!  [`Money`]: super::Money
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
