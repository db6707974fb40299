//! Internal helpers for invariant checks.
//!
//! These utilities are **not** part of the public API.

use crate::{Currency, EngineError, ResultEngine};

/// Ensure two amounts being combined share the same currency.
pub(crate) fn ensure_same_currency(left: Currency, right: Currency) -> ResultEngine<()> {
    if left != right {
        return Err(EngineError::InvalidCurrencyMix { left, right });
    }
    Ok(())
}
