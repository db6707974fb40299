//! Wire rows to engine entities.
//!
//! Only vaults carry a currency on the wire; every other amount is in the
//! primary currency of the account.

use api_types::{
    EntryType,
    bank::BankOut,
    category::CategoryOut,
    credit_card::CreditCardOut,
    recurring::RecurringOut,
    transaction::TransactionOut,
    vault::VaultOut,
};
use engine::{
    Bank, Category, CreditCard, Currency, MonetaryAmount, MoneyCents, RecurringItem,
    ResultEngine, Transaction, TransactionKind, Vault,
};

pub fn kind(entry: EntryType) -> TransactionKind {
    match entry {
        EntryType::Income => TransactionKind::Income,
        EntryType::Expense => TransactionKind::Expense,
    }
}

pub fn entry_type(kind: TransactionKind) -> EntryType {
    match kind {
        TransactionKind::Income => EntryType::Income,
        TransactionKind::Expense => EntryType::Expense,
    }
}

fn amount(value: f64, currency: Currency) -> ResultEngine<MonetaryAmount> {
    Ok(MonetaryAmount::new(MoneyCents::from_major_f64(value)?, currency))
}

pub fn bank(row: BankOut, primary: Currency) -> ResultEngine<Bank> {
    Ok(Bank {
        id: row.id,
        name: row.name,
        icon_color: row.icon_color,
        current_balance: amount(row.current_balance, primary)?,
    })
}

pub fn vault(row: VaultOut) -> ResultEngine<Vault> {
    let currency = Currency::try_from(row.currency.as_str())?;
    Ok(Vault {
        id: row.id,
        name: row.name,
        bank_id: row.bank_id,
        balance: amount(row.balance, currency)?,
    })
}

pub fn credit_card(row: CreditCardOut, primary: Currency) -> ResultEngine<CreditCard> {
    Ok(CreditCard {
        id: row.id,
        name: row.name,
        limit: amount(row.limit, primary)?,
        closing_day: row.closing_day,
        due_day: row.due_day,
        color: row.color,
    })
}

pub fn category(row: CategoryOut) -> Category {
    Category {
        id: row.id,
        name: row.name,
        kind: kind(row.kind),
        icon: row.icon,
        is_system: row.is_system,
    }
}

pub fn transaction(row: TransactionOut, primary: Currency) -> ResultEngine<Transaction> {
    Ok(Transaction {
        id: row.id,
        amount: amount(row.amount, primary)?,
        kind: kind(row.kind),
        category_id: row.category_id,
        bank_id: row.bank_id,
        vault_id: row.vault_id,
        credit_card_id: row.credit_card_id,
        date: row.date,
        description: row.description,
        installment_number: row.installment_number,
        total_installments: row.total_installments,
    })
}

pub fn recurring(row: RecurringOut, primary: Currency) -> ResultEngine<RecurringItem> {
    Ok(RecurringItem {
        id: row.id,
        amount: amount(row.amount, primary)?,
        kind: kind(row.kind),
        day_of_month: row.day_of_month,
        category_id: row.category_id,
        bank_id: row.bank_id,
        credit_card_id: row.credit_card_id,
        description: row.description,
        is_active: row.is_active,
    })
}
