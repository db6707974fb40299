//! One request wave of entities and the view model derived from it.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    AccountSummary, Bank, Category, CreditCard, CreditCardOverview, Currency, PeriodSummary,
    Period, RecurringItem, ResultEngine, Transaction, Vault, categories::summarize_period,
    credit_cards::summarize_credit_cards, recurring::upcoming_due, summarize_accounts,
};

/// Logically consistent snapshot of everything the dashboard reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub period: Period,
    pub banks: Vec<Bank>,
    pub vaults: Vec<Vault>,
    pub credit_cards: Vec<CreditCard>,
    pub transactions: Vec<Transaction>,
    pub recurring: Vec<RecurringItem>,
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub period: Period,
    pub reference_date: NaiveDate,
    pub accounts: AccountSummary,
    pub credit_cards: CreditCardOverview,
    pub summary: PeriodSummary,
    /// Active recurring items near due at `reference_date`.
    pub upcoming: Vec<RecurringItem>,
}

impl Snapshot {
    /// Derives the dashboard view model.
    ///
    /// Nothing is cached: every call recomputes from the snapshot.
    pub fn dashboard(
        &self,
        reference_date: NaiveDate,
        primary: Currency,
        window_days: u32,
    ) -> ResultEngine<Dashboard> {
        let summary = summarize_period(self.period, &self.transactions, &self.categories, primary)?;
        let accounts = summarize_accounts(&self.banks, &self.vaults, primary)?;
        let credit_cards = summarize_credit_cards(&self.credit_cards, reference_date, window_days)?;
        let upcoming = upcoming_due(&self.recurring, reference_date, window_days)
            .into_iter()
            .cloned()
            .collect();

        Ok(Dashboard {
            period: self.period,
            reference_date,
            accounts,
            credit_cards,
            summary,
            upcoming,
        })
    }
}
