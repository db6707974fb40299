//! Banks, their vaults and the per-currency account aggregation.
//!
//! A bank's `current_balance` is computed upstream as the sum of its vaults
//! and is always trusted as provided: the aggregator never recomputes it.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::{BankId, Currency, MonetaryAmount, ResultEngine, VaultId};

/// Top-level account. Its balance is expressed in the primary currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub id: BankId,
    pub name: String,
    pub icon_color: Option<String>,
    pub current_balance: MonetaryAmount,
}

/// A named sub-balance ("caixinha") nested under a bank.
///
/// The vault's currency is the currency of its balance, which may differ
/// from the primary currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vault {
    pub id: VaultId,
    pub name: String,
    pub bank_id: Option<BankId>,
    pub balance: MonetaryAmount,
}

impl Vault {
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }
}

/// A bank paired with the balance displayed for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BankBalance {
    pub bank: Bank,
    pub balance: MonetaryAmount,
}

/// Aggregated view of a bank/vault snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub primary_currency: Currency,
    /// Bank balances in the primary bucket, foreign-currency vaults in their
    /// own bucket. Nothing is converted.
    pub total_by_currency: BTreeMap<Currency, MonetaryAmount>,
    /// Same order as the input banks.
    pub bank_balances: Vec<BankBalance>,
    /// Every bank of the snapshot has an entry, possibly empty.
    pub vaults_by_bank: BTreeMap<BankId, Vec<Vault>>,
    /// Vaults whose bank is not part of the snapshot.
    pub orphan_vaults: Vec<Vault>,
}

impl AccountSummary {
    /// Total held in the primary currency.
    #[must_use]
    pub fn patrimony(&self) -> MonetaryAmount {
        self.total(self.primary_currency)
    }

    /// Total of a currency bucket; zero when the bucket is absent.
    #[must_use]
    pub fn total(&self, currency: Currency) -> MonetaryAmount {
        self.total_by_currency
            .get(&currency)
            .copied()
            .unwrap_or_else(|| MonetaryAmount::zero(currency))
    }

    /// Vaults grouped under `bank_id`, in input order.
    #[must_use]
    pub fn vaults_for(&self, bank_id: BankId) -> &[Vault] {
        self.vaults_by_bank
            .get(&bank_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Combines banks and vaults into per-currency totals and per-bank groups.
///
/// - Every bank balance is added to the `primary` bucket; a bank balance in
///   another currency is an [`InvalidCurrencyMix`](crate::EngineError::InvalidCurrencyMix).
/// - Vaults in a foreign currency are added to their own bucket. Vaults in
///   the primary currency are already part of their bank's balance.
/// - A vault whose bank is missing is left out of `vaults_by_bank` but still
///   counts toward its currency bucket.
pub fn summarize_accounts(
    banks: &[Bank],
    vaults: &[Vault],
    primary: Currency,
) -> ResultEngine<AccountSummary> {
    let mut total_by_currency = BTreeMap::new();
    total_by_currency.insert(primary, MonetaryAmount::zero(primary));

    let mut bank_balances = Vec::with_capacity(banks.len());
    let mut vaults_by_bank: BTreeMap<BankId, Vec<Vault>> = BTreeMap::new();
    for bank in banks {
        add_to_bucket(&mut total_by_currency, primary, bank.current_balance)?;
        bank_balances.push(BankBalance {
            bank: bank.clone(),
            balance: bank.current_balance,
        });
        vaults_by_bank.entry(bank.id).or_default();
    }

    let known: HashSet<BankId> = banks.iter().map(|bank| bank.id).collect();
    let mut orphan_vaults = Vec::new();
    for vault in vaults {
        if vault.currency() != primary {
            add_to_bucket(&mut total_by_currency, vault.currency(), vault.balance)?;
        }

        match vault.bank_id {
            Some(bank_id) if known.contains(&bank_id) => {
                vaults_by_bank.entry(bank_id).or_default().push(vault.clone());
            }
            bank_id => {
                tracing::warn!(
                    "vault {} references missing bank {bank_id:?}",
                    vault.id
                );
                orphan_vaults.push(vault.clone());
            }
        }
    }

    Ok(AccountSummary {
        primary_currency: primary,
        total_by_currency,
        bank_balances,
        vaults_by_bank,
        orphan_vaults,
    })
}

fn add_to_bucket(
    totals: &mut BTreeMap<Currency, MonetaryAmount>,
    bucket: Currency,
    amount: MonetaryAmount,
) -> ResultEngine<()> {
    let current = totals
        .get(&bucket)
        .copied()
        .unwrap_or_else(|| MonetaryAmount::zero(bucket));
    totals.insert(bucket, current.try_add(amount)?);
    Ok(())
}
