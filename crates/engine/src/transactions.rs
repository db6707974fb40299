//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense booked on a date, optionally
//! tied to a category and to the bank, vault or credit card that paid it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Bank, BankId, CategoryId, CreditCard, CreditCardId, EngineError, MonetaryAmount,
    ResultEngine, TransactionId, Vault, VaultId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Applies the kind's sign to an unsigned amount.
    #[must_use]
    pub fn signed(self, amount: MonetaryAmount) -> MonetaryAmount {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::UnknownTransactionKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Unsigned amount; `kind` carries the direction.
    pub amount: MonetaryAmount,
    pub kind: TransactionKind,
    pub category_id: Option<CategoryId>,
    pub bank_id: Option<BankId>,
    /// When set, `bank_id` usually carries the vault's parent bank.
    pub vault_id: Option<VaultId>,
    pub credit_card_id: Option<CreditCardId>,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub installment_number: Option<u32>,
    pub total_installments: Option<u32>,
}

impl Transaction {
    /// Amount with the sign of its kind: income positive, expense negative.
    #[must_use]
    pub fn signed_amount(&self) -> MonetaryAmount {
        self.kind.signed(self.amount)
    }

    /// `"3/10"` style label for installment purchases.
    #[must_use]
    pub fn installment_label(&self) -> Option<String> {
        match (self.installment_number, self.total_installments) {
            (Some(number), Some(total)) if total > 1 => Some(format!("{number}/{total}")),
            _ => None,
        }
    }
}

/// The account a transaction was paid from or credited to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentSource<'a> {
    Bank(&'a Bank),
    Vault { vault: &'a Vault, bank: Option<&'a Bank> },
    CreditCard(&'a CreditCard),
}

/// Resolves the payment source of `transaction` against a snapshot.
///
/// Precedence is vault, then credit card, then bank, matching how the source
/// data carries the vault's parent bank alongside the vault. A referenced id
/// absent from the snapshot is a [`EngineError::MalformedReference`];
/// a transaction with no source at all resolves to `None`.
pub fn resolve_payment_source<'a>(
    transaction: &Transaction,
    banks: &'a [Bank],
    vaults: &'a [Vault],
    cards: &'a [CreditCard],
) -> ResultEngine<Option<PaymentSource<'a>>> {
    let find_bank = move |id: BankId| banks.iter().find(|bank| bank.id == id);

    if let Some(vault_id) = transaction.vault_id {
        let vault = vaults
            .iter()
            .find(|vault| vault.id == vault_id)
            .ok_or_else(|| missing("vault", vault_id, transaction.id))?;
        let bank = vault.bank_id.or(transaction.bank_id).and_then(find_bank);
        return Ok(Some(PaymentSource::Vault { vault, bank }));
    }

    if let Some(card_id) = transaction.credit_card_id {
        let card = cards
            .iter()
            .find(|card| card.id == card_id)
            .ok_or_else(|| missing("credit card", card_id, transaction.id))?;
        return Ok(Some(PaymentSource::CreditCard(card)));
    }

    if let Some(bank_id) = transaction.bank_id {
        let bank = find_bank(bank_id).ok_or_else(|| missing("bank", bank_id, transaction.id))?;
        return Ok(Some(PaymentSource::Bank(bank)));
    }

    Ok(None)
}

fn missing(label: &str, id: i64, transaction_id: TransactionId) -> EngineError {
    EngineError::MalformedReference(format!(
        "transaction {transaction_id} references missing {label} {id}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    fn transaction() -> Transaction {
        Transaction {
            id: 1,
            amount: MonetaryAmount::new(2_000, Currency::Brl),
            kind: TransactionKind::Expense,
            category_id: None,
            bank_id: None,
            vault_id: None,
            credit_card_id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            description: None,
            installment_number: None,
            total_installments: None,
        }
    }

    fn bank() -> Bank {
        Bank {
            id: 1,
            name: "Nubank".to_string(),
            icon_color: Some("#820ad1".to_string()),
            current_balance: MonetaryAmount::new(0, Currency::Brl),
        }
    }

    fn vault() -> Vault {
        Vault {
            id: 5,
            name: "Reserva".to_string(),
            bank_id: Some(1),
            balance: MonetaryAmount::new(0, Currency::Brl),
        }
    }

    #[test]
    fn signed_amount_follows_kind() {
        let mut tx = transaction();
        assert_eq!(tx.signed_amount().minor(), -2_000);
        tx.kind = TransactionKind::Income;
        assert_eq!(tx.signed_amount().minor(), 2_000);
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert_eq!(
            TransactionKind::try_from("refund"),
            Err(EngineError::UnknownTransactionKind("refund".to_string()))
        );
    }

    #[test]
    fn installment_label_only_for_split_purchases() {
        let mut tx = transaction();
        assert_eq!(tx.installment_label(), None);
        tx.installment_number = Some(3);
        tx.total_installments = Some(10);
        assert_eq!(tx.installment_label().as_deref(), Some("3/10"));
        tx.total_installments = Some(1);
        assert_eq!(tx.installment_label(), None);
    }

    #[test]
    fn vault_wins_over_its_parent_bank() {
        let banks = [bank()];
        let vaults = [vault()];
        let mut tx = transaction();
        tx.bank_id = Some(1);
        tx.vault_id = Some(5);

        let source = resolve_payment_source(&tx, &banks, &vaults, &[]).unwrap();

        assert_eq!(
            source,
            Some(PaymentSource::Vault {
                vault: &vaults[0],
                bank: Some(&banks[0]),
            })
        );
    }

    #[test]
    fn missing_reference_is_malformed() {
        let mut tx = transaction();
        tx.credit_card_id = Some(9);

        let err = resolve_payment_source(&tx, &[], &[], &[]).unwrap_err();

        assert!(matches!(err, EngineError::MalformedReference(_)));
    }

    #[test]
    fn no_source_resolves_to_none() {
        assert_eq!(
            resolve_payment_source(&transaction(), &[], &[], &[]).unwrap(),
            None
        );
    }
}
