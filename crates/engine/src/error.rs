//! The module contains the errors the engine can return.
//!
//! The engine performs no I/O, so every error is a contract violation by the
//! caller:
//!
//! - [`InvalidCurrencyMix`] thrown when two amounts of different currencies
//!   are combined.
//! - [`MalformedReference`] thrown when a record points to an id that must
//!   resolve inside the snapshot and does not.
//!
//!  [`InvalidCurrencyMix`]: EngineError::InvalidCurrencyMix
//!  [`MalformedReference`]: EngineError::MalformedReference
use thiserror::Error;

use crate::Currency;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid currency mix: {left} and {right}")]
    InvalidCurrencyMix { left: Currency, right: Currency },
    #[error("Malformed reference: {0}")]
    MalformedReference(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Unknown transaction kind: {0}")]
    UnknownTransactionKind(String),
}
