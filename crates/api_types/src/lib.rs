//! JSON bodies exchanged with the finance REST API.
//!
//! Amounts travel as floats in major units and ids as integers, exactly as
//! the server emits them. Optional fields of update bodies are omitted when
//! unset so the server only touches what was sent.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Income,
    Expense,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLogin {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreate {
        pub email: String,
        pub password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub full_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        #[serde(default = "bearer")]
        pub token_type: String,
    }

    fn bearer() -> String {
        "bearer".to_string()
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserOut {
        pub id: i64,
        pub email: String,
        pub full_name: Option<String>,
        pub monthly_salary: Option<f64>,
        /// ISO-8601 timestamp.
        pub created_at: Option<String>,
    }
}

pub mod bank {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BankCreate {
        pub name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub icon_color: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct BankUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub icon_color: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BankOut {
        pub id: i64,
        pub name: String,
        /// Sum of the bank's vaults, computed by the server.
        pub current_balance: f64,
        #[serde(default)]
        pub icon_color: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }
}

pub mod vault {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct VaultCreate {
        pub name: String,
        pub bank_id: i64,
        /// ISO currency code, e.g. `BRL`.
        pub currency: String,
        pub initial_balance: f64,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct VaultUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub balance: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub bank_id: Option<i64>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct VaultOut {
        pub id: i64,
        #[serde(default)]
        pub bank_id: Option<i64>,
        pub name: String,
        pub currency: String,
        pub balance: f64,
        #[serde(default)]
        pub created_at: Option<String>,
    }
}

pub mod credit_card {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CreditCardCreate {
        pub name: String,
        pub limit: f64,
        pub closing_day: u32,
        pub due_day: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub color: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CreditCardUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub closing_day: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub due_day: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub color: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CreditCardOut {
        pub id: i64,
        pub name: String,
        pub limit: f64,
        pub closing_day: u32,
        pub due_day: u32,
        #[serde(default)]
        pub color: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub icon: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        pub kind: Option<EntryType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub icon: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryOut {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(default)]
        pub is_system: bool,
        #[serde(default)]
        pub icon: Option<String>,
    }
}

pub mod transaction {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub bank_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub vault_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub credit_card_id: Option<i64>,
        pub date: NaiveDate,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        /// Number of installments; the server splits the purchase monthly.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub installments: Option<u32>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionOut {
        pub id: i64,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(default)]
        pub category_id: Option<i64>,
        #[serde(default)]
        pub bank_id: Option<i64>,
        #[serde(default)]
        pub vault_id: Option<i64>,
        #[serde(default)]
        pub credit_card_id: Option<i64>,
        #[serde(default)]
        pub installment_number: Option<u32>,
        #[serde(default)]
        pub total_installments: Option<u32>,
        pub date: NaiveDate,
        #[serde(default)]
        pub description: Option<String>,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RecurringCreate {
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub bank_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub credit_card_id: Option<i64>,
        pub day_of_month: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct RecurringUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub day_of_month: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub is_active: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RecurringOut {
        pub id: i64,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: EntryType,
        #[serde(default)]
        pub category_id: Option<i64>,
        #[serde(default)]
        pub bank_id: Option<i64>,
        #[serde(default)]
        pub credit_card_id: Option<i64>,
        pub day_of_month: u32,
        #[serde(default)]
        pub description: Option<String>,
        pub is_active: bool,
    }
}

pub mod dashboard {
    use std::collections::HashMap;

    use super::*;

    /// Query string of every period-scoped endpoint.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PeriodQuery {
        pub month: u32,
        pub year: i32,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DashboardSummary {
        pub month: u32,
        pub year: i32,
        pub total_income: f64,
        pub total_expense: f64,
        pub net: f64,
        /// Category name -> signed total.
        pub by_category: HashMap<String, f64>,
    }
}
