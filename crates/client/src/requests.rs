//! Every write the client can send, with the views each one makes stale.

use api_types::{
    bank::{BankCreate, BankOut, BankUpdate},
    category::{CategoryCreate, CategoryOut, CategoryUpdate},
    credit_card::{CreditCardCreate, CreditCardOut, CreditCardUpdate},
    recurring::{RecurringCreate, RecurringOut, RecurringUpdate},
    transaction::{TransactionCreate, TransactionOut},
    vault::{VaultCreate, VaultOut, VaultUpdate},
};
use engine::{
    BankId, CategoryId, CreditCardId, Period, RecurringId, TransactionId, VaultId,
};
use reqwest::Method;

use crate::views::{ViewGroup, ViewKey};

#[derive(Clone, Debug)]
pub enum WriteRequest {
    CreateBank(BankCreate),
    UpdateBank { id: BankId, body: BankUpdate },
    DeleteBank(BankId),
    CreateVault(VaultCreate),
    UpdateVault { id: VaultId, body: VaultUpdate },
    DeleteVault(VaultId),
    CreateCreditCard(CreditCardCreate),
    UpdateCreditCard { id: CreditCardId, body: CreditCardUpdate },
    DeleteCreditCard(CreditCardId),
    CreateRecurring(RecurringCreate),
    UpdateRecurring { id: RecurringId, body: RecurringUpdate },
    DeleteRecurring(RecurringId),
    CreateCategory(CategoryCreate),
    UpdateCategory { id: CategoryId, body: CategoryUpdate },
    DeleteCategory(CategoryId),
    CreateTransaction(TransactionCreate),
    DeleteTransaction(TransactionId),
}

/// Server response of a successful write.
#[derive(Clone, Debug)]
pub enum WriteOutcome {
    Bank(BankOut),
    Vault(VaultOut),
    CreditCard(CreditCardOut),
    Recurring(RecurringOut),
    Category(CategoryOut),
    Transaction(TransactionOut),
    /// Deletes answer with an empty body.
    Deleted,
}

impl WriteRequest {
    pub fn method(&self) -> Method {
        match self {
            Self::CreateBank(_)
            | Self::CreateVault(_)
            | Self::CreateCreditCard(_)
            | Self::CreateRecurring(_)
            | Self::CreateCategory(_)
            | Self::CreateTransaction(_) => Method::POST,
            Self::UpdateBank { .. }
            | Self::UpdateVault { .. }
            | Self::UpdateCreditCard { .. }
            | Self::UpdateRecurring { .. }
            | Self::UpdateCategory { .. } => Method::PUT,
            Self::DeleteBank(_)
            | Self::DeleteVault(_)
            | Self::DeleteCreditCard(_)
            | Self::DeleteRecurring(_)
            | Self::DeleteCategory(_)
            | Self::DeleteTransaction(_) => Method::DELETE,
        }
    }

    /// Path relative to the API base url.
    pub fn path(&self) -> String {
        match self {
            Self::CreateBank(_) => "/banks/".to_string(),
            Self::UpdateBank { id, .. } | Self::DeleteBank(id) => format!("/banks/{id}"),
            Self::CreateVault(_) => "/vaults/".to_string(),
            Self::UpdateVault { id, .. } | Self::DeleteVault(id) => format!("/vaults/{id}"),
            Self::CreateCreditCard(_) => "/credit-cards/".to_string(),
            Self::UpdateCreditCard { id, .. } | Self::DeleteCreditCard(id) => {
                format!("/credit-cards/{id}")
            }
            Self::CreateRecurring(_) => "/recurring/".to_string(),
            Self::UpdateRecurring { id, .. } | Self::DeleteRecurring(id) => {
                format!("/recurring/{id}")
            }
            Self::CreateCategory(_) => "/categories/".to_string(),
            Self::UpdateCategory { id, .. } | Self::DeleteCategory(id) => {
                format!("/categories/{id}")
            }
            Self::CreateTransaction(_) => "/transactions/".to_string(),
            Self::DeleteTransaction(id) => format!("/transactions/{id}"),
        }
    }

    /// JSON body, `None` for deletes.
    pub fn body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        let value = match self {
            Self::CreateBank(body) => serde_json::to_value(body)?,
            Self::UpdateBank { body, .. } => serde_json::to_value(body)?,
            Self::CreateVault(body) => serde_json::to_value(body)?,
            Self::UpdateVault { body, .. } => serde_json::to_value(body)?,
            Self::CreateCreditCard(body) => serde_json::to_value(body)?,
            Self::UpdateCreditCard { body, .. } => serde_json::to_value(body)?,
            Self::CreateRecurring(body) => serde_json::to_value(body)?,
            Self::UpdateRecurring { body, .. } => serde_json::to_value(body)?,
            Self::CreateCategory(body) => serde_json::to_value(body)?,
            Self::UpdateCategory { body, .. } => serde_json::to_value(body)?,
            Self::CreateTransaction(body) => serde_json::to_value(body)?,
            Self::DeleteBank(_)
            | Self::DeleteVault(_)
            | Self::DeleteCreditCard(_)
            | Self::DeleteRecurring(_)
            | Self::DeleteCategory(_)
            | Self::DeleteTransaction(_) => return Ok(None),
        };
        Ok(Some(value))
    }

    /// Views that must be refetched once this write succeeds.
    ///
    /// Vault writes move bank balances, so they also drop banks. The server
    /// summary groups by category name, so renaming or deleting a category
    /// drops the dashboard. A single transaction only touches the period of
    /// its date; installments spread over later months and a delete does not
    /// know its date, so those drop every period. A transaction booked on a
    /// vault moves the vault and bank balances; a delete may have been one.
    pub fn invalidates(&self) -> Vec<ViewKey> {
        use ViewGroup::*;

        match self {
            Self::CreateBank(_) | Self::UpdateBank { .. } | Self::DeleteBank(_) => {
                vec![ViewKey::all(Banks), ViewKey::all(Dashboard)]
            }
            Self::CreateVault(_) | Self::UpdateVault { .. } | Self::DeleteVault(_) => vec![
                ViewKey::all(Vaults),
                ViewKey::all(Banks),
                ViewKey::all(Dashboard),
            ],
            Self::CreateCreditCard(_)
            | Self::UpdateCreditCard { .. }
            | Self::DeleteCreditCard(_) => vec![ViewKey::all(CreditCards)],
            Self::CreateRecurring(_) | Self::UpdateRecurring { .. } | Self::DeleteRecurring(_) => {
                vec![ViewKey::all(Recurring), ViewKey::all(Dashboard)]
            }
            Self::CreateCategory(_) => vec![ViewKey::all(Categories)],
            Self::UpdateCategory { .. } | Self::DeleteCategory(_) => {
                vec![ViewKey::all(Categories), ViewKey::all(Dashboard)]
            }
            Self::CreateTransaction(body) => {
                let mut keys = if body.installments.unwrap_or(1) <= 1 {
                    let period = Period::from_date(body.date);
                    vec![
                        ViewKey::for_period(Transactions, period),
                        ViewKey::for_period(Dashboard, period),
                    ]
                } else {
                    vec![ViewKey::all(Transactions), ViewKey::all(Dashboard)]
                };
                if body.vault_id.is_some() {
                    keys.extend([ViewKey::all(Vaults), ViewKey::all(Banks)]);
                }
                keys
            }
            Self::DeleteTransaction(_) => vec![
                ViewKey::all(Transactions),
                ViewKey::all(Dashboard),
                ViewKey::all(Vaults),
                ViewKey::all(Banks),
            ],
        }
    }

    /// Decodes the success body into the matching outcome.
    pub(crate) fn outcome(&self, body: &[u8]) -> serde_json::Result<WriteOutcome> {
        let outcome = match self {
            Self::CreateBank(_) | Self::UpdateBank { .. } => {
                WriteOutcome::Bank(serde_json::from_slice(body)?)
            }
            Self::CreateVault(_) | Self::UpdateVault { .. } => {
                WriteOutcome::Vault(serde_json::from_slice(body)?)
            }
            Self::CreateCreditCard(_) | Self::UpdateCreditCard { .. } => {
                WriteOutcome::CreditCard(serde_json::from_slice(body)?)
            }
            Self::CreateRecurring(_) | Self::UpdateRecurring { .. } => {
                WriteOutcome::Recurring(serde_json::from_slice(body)?)
            }
            Self::CreateCategory(_) | Self::UpdateCategory { .. } => {
                WriteOutcome::Category(serde_json::from_slice(body)?)
            }
            Self::CreateTransaction(_) => WriteOutcome::Transaction(serde_json::from_slice(body)?),
            Self::DeleteBank(_)
            | Self::DeleteVault(_)
            | Self::DeleteCreditCard(_)
            | Self::DeleteRecurring(_)
            | Self::DeleteCategory(_)
            | Self::DeleteTransaction(_) => WriteOutcome::Deleted,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use api_types::EntryType;
    use chrono::NaiveDate;

    use super::*;

    fn purchase(installments: Option<u32>) -> TransactionCreate {
        TransactionCreate {
            amount: 120.0,
            kind: EntryType::Expense,
            category_id: None,
            bank_id: None,
            vault_id: None,
            credit_card_id: Some(2),
            date: NaiveDate::from_ymd_opt(2025, 5, 17).unwrap(),
            description: Some("Mercado".to_string()),
            installments,
        }
    }

    #[test]
    fn routes() {
        assert_eq!(WriteRequest::DeleteVault(4).path(), "/vaults/4");
        assert_eq!(WriteRequest::DeleteVault(4).method(), Method::DELETE);
        assert_eq!(
            WriteRequest::UpdateCreditCard {
                id: 2,
                body: CreditCardUpdate::default()
            }
            .path(),
            "/credit-cards/2"
        );
        assert_eq!(
            WriteRequest::CreateTransaction(purchase(None)).method(),
            Method::POST
        );
    }

    #[test]
    fn vault_writes_drop_bank_balances() {
        let keys = WriteRequest::DeleteVault(1).invalidates();
        assert!(keys.contains(&ViewKey::all(ViewGroup::Banks)));
        assert!(keys.contains(&ViewKey::all(ViewGroup::Dashboard)));
    }

    #[test]
    fn card_writes_leave_the_dashboard_alone() {
        let keys = WriteRequest::DeleteCreditCard(1).invalidates();
        assert_eq!(keys, vec![ViewKey::all(ViewGroup::CreditCards)]);
    }

    #[test]
    fn single_transaction_only_drops_its_period() {
        let may = Period::new(5, 2025);
        let keys = WriteRequest::CreateTransaction(purchase(Some(1))).invalidates();
        assert_eq!(
            keys,
            vec![
                ViewKey::for_period(ViewGroup::Transactions, may),
                ViewKey::for_period(ViewGroup::Dashboard, may),
            ]
        );

        let keys = WriteRequest::CreateTransaction(purchase(Some(3))).invalidates();
        assert!(keys.contains(&ViewKey::all(ViewGroup::Transactions)));
    }

    #[test]
    fn vault_transactions_drop_balances() {
        let mut body = purchase(None);
        body.credit_card_id = None;
        body.bank_id = Some(1);
        body.vault_id = Some(10);

        let keys = WriteRequest::CreateTransaction(body).invalidates();
        assert!(keys.contains(&ViewKey::all(ViewGroup::Vaults)));
        assert!(keys.contains(&ViewKey::all(ViewGroup::Banks)));

        let keys = WriteRequest::CreateTransaction(purchase(None)).invalidates();
        assert!(!keys.contains(&ViewKey::all(ViewGroup::Banks)));

        let keys = WriteRequest::DeleteTransaction(4).invalidates();
        assert!(keys.contains(&ViewKey::all(ViewGroup::Vaults)));
        assert!(keys.contains(&ViewKey::all(ViewGroup::Banks)));
    }

    #[test]
    fn renaming_a_category_drops_the_dashboard() {
        let keys = WriteRequest::UpdateCategory {
            id: 2,
            body: CategoryUpdate::default(),
        }
        .invalidates();
        assert!(keys.contains(&ViewKey::all(ViewGroup::Dashboard)));
        assert_eq!(
            WriteRequest::CreateCategory(CategoryCreate {
                name: "Pets".to_string(),
                kind: EntryType::Expense,
                icon: None,
            })
            .invalidates(),
            vec![ViewKey::all(ViewGroup::Categories)]
        );
    }

    #[test]
    fn deletes_have_no_body() {
        assert!(WriteRequest::DeleteBank(1).body().unwrap().is_none());
        assert!(
            WriteRequest::CreateTransaction(purchase(None))
                .body()
                .unwrap()
                .is_some()
        );
    }
}
