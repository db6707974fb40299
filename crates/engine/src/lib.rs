//! Pure view-model derivation for personal-finance snapshots.
//!
//! The engine reads immutable snapshots of banks, vaults, credit cards,
//! transactions, recurring items and categories, and derives display values
//! from them: per-currency totals, category breakdowns and near-due flags.
//! It performs no I/O and holds no state between calls, so every function is
//! re-entrant.

pub use accounts::{AccountSummary, Bank, BankBalance, Vault, summarize_accounts};
pub use categories::{
    Category, CategoryTotal, PeriodSummary, UNCATEGORIZED_LABEL, breakdown_by_category,
    breakdown_by_category_kind, summarize_period,
};
pub use credit_cards::{CreditCard, CreditCardOverview, summarize_credit_cards};
pub use currency::{Currency, NumberStyle};
pub use dashboard::{Dashboard, Snapshot};
pub use error::EngineError;
pub use money::{
    MonetaryAmount, MoneyCents, format_number, format_optional, format_raw, format_user_input,
};
pub use period::Period;
pub use recurring::{DEFAULT_NEAR_DUE_WINDOW, RecurringItem, is_day_near, near_due, upcoming_due};
pub use transactions::{PaymentSource, Transaction, TransactionKind, resolve_payment_source};

mod accounts;
mod categories;
mod credit_cards;
mod currency;
mod dashboard;
mod error;
mod money;
mod period;
mod recurring;
mod transactions;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;

pub type BankId = i64;
pub type VaultId = i64;
pub type CreditCardId = i64;
pub type CategoryId = i64;
pub type TransactionId = i64;
pub type RecurringId = i64;
