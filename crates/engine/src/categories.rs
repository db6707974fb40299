//! Category registry and the per-category breakdown of a period.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    CategoryId, Currency, MonetaryAmount, Period, ResultEngine, Transaction, TransactionKind,
};

/// Label of the bucket collecting transactions without a known category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: TransactionKind,
    pub icon: Option<String>,
    /// Built-in categories shared by every user.
    pub is_system: bool,
}

/// Signed total of one category bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// `None` for the fallback bucket.
    pub category_id: Option<CategoryId>,
    pub label: String,
    pub total: MonetaryAmount,
}

/// Totals of a period, the client-side twin of the dashboard summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub total_income: MonetaryAmount,
    pub total_expense: MonetaryAmount,
    pub net: MonetaryAmount,
    pub by_category: Vec<CategoryTotal>,
}

/// Groups transactions per category with income as `+amount` and expense
/// as `-amount`.
///
/// Buckets appear in order of first appearance. Transactions without a
/// category, or whose category is not in `categories`, land in the
/// [`UNCATEGORIZED_LABEL`] bucket. An empty list yields an empty breakdown.
pub fn breakdown_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> ResultEngine<Vec<CategoryTotal>> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();

    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut positions: HashMap<Option<CategoryId>, usize> = HashMap::new();

    for transaction in transactions {
        let key = transaction
            .category_id
            .filter(|id| names.contains_key(id));
        if let (Some(id), None) = (transaction.category_id, key) {
            tracing::debug!(
                "transaction {} has unknown category {id}, using fallback bucket",
                transaction.id
            );
        }

        let signed = transaction.signed_amount();
        match positions.get(&key) {
            Some(&position) => {
                let entry = &mut totals[position];
                entry.total = entry.total.try_add(signed)?;
            }
            None => {
                let label = key
                    .and_then(|id| names.get(&id))
                    .map_or_else(|| UNCATEGORIZED_LABEL.to_string(), ToString::to_string);
                positions.insert(key, totals.len());
                totals.push(CategoryTotal {
                    category_id: key,
                    label,
                    total: signed,
                });
            }
        }
    }

    Ok(totals)
}

/// Same as [`breakdown_by_category`] restricted to one kind.
pub fn breakdown_by_category_kind(
    transactions: &[Transaction],
    categories: &[Category],
    kind: TransactionKind,
) -> ResultEngine<Vec<CategoryTotal>> {
    let filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .cloned()
        .collect();
    breakdown_by_category(&filtered, categories)
}

/// Income, expense, net and category breakdown of `period`.
///
/// Transactions dated outside the period are skipped.
pub fn summarize_period(
    period: Period,
    transactions: &[Transaction],
    categories: &[Category],
    currency: Currency,
) -> ResultEngine<PeriodSummary> {
    period.validate()?;

    let in_period: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            let keep = period.contains(transaction.date);
            if !keep {
                tracing::debug!(
                    "skipping transaction {} dated {} outside {period}",
                    transaction.id,
                    transaction.date
                );
            }
            keep
        })
        .cloned()
        .collect();

    let sum_kind = |kind: TransactionKind| {
        MonetaryAmount::try_sum(
            in_period
                .iter()
                .filter(|transaction| transaction.kind == kind)
                .map(|transaction| &transaction.amount),
            currency,
        )
    };
    let total_income = sum_kind(TransactionKind::Income)?;
    let total_expense = sum_kind(TransactionKind::Expense)?;

    Ok(PeriodSummary {
        period,
        total_income,
        total_expense,
        net: total_income.try_sub(total_expense)?,
        by_category: breakdown_by_category(&in_period, categories)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::EngineError;

    fn category(id: CategoryId, name: &str, kind: TransactionKind) -> Category {
        Category {
            id,
            name: name.to_string(),
            kind,
            icon: None,
            is_system: false,
        }
    }

    fn tx(id: i64, cents: i64, kind: TransactionKind, category_id: Option<CategoryId>) -> Transaction {
        Transaction {
            id,
            amount: MonetaryAmount::new(cents, Currency::Brl),
            kind,
            category_id,
            bank_id: None,
            vault_id: None,
            credit_card_id: None,
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            description: None,
            installment_number: None,
            total_installments: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            category(1, "Salário", TransactionKind::Income),
            category(2, "Mercado", TransactionKind::Expense),
        ]
    }

    #[test]
    fn signed_totals_in_first_appearance_order() {
        let transactions = [
            tx(1, 4_000, TransactionKind::Expense, Some(2)),
            tx(2, 500_000, TransactionKind::Income, Some(1)),
            tx(3, 1_000, TransactionKind::Expense, None),
            tx(4, 6_000, TransactionKind::Expense, Some(2)),
        ];

        let totals = breakdown_by_category(&transactions, &categories()).unwrap();

        let view: Vec<(&str, i64)> = totals
            .iter()
            .map(|total| (total.label.as_str(), total.total.minor()))
            .collect();
        assert_eq!(
            view,
            vec![("Mercado", -10_000), ("Salário", 500_000), (UNCATEGORIZED_LABEL, -1_000)]
        );
    }

    #[test]
    fn unknown_category_falls_back() {
        let transactions = [
            tx(1, 100, TransactionKind::Expense, Some(99)),
            tx(2, 50, TransactionKind::Income, None),
        ];

        let totals = breakdown_by_category(&transactions, &categories()).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category_id, None);
        assert_eq!(totals[0].label, UNCATEGORIZED_LABEL);
        assert_eq!(totals[0].total.minor(), -50);
    }

    #[test]
    fn empty_list_is_empty_breakdown() {
        assert!(breakdown_by_category(&[], &categories()).unwrap().is_empty());
    }

    #[test]
    fn kind_filter() {
        let transactions = [
            tx(1, 4_000, TransactionKind::Expense, Some(2)),
            tx(2, 500_000, TransactionKind::Income, Some(1)),
        ];

        let totals =
            breakdown_by_category_kind(&transactions, &categories(), TransactionKind::Income)
                .unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].label, "Salário");
    }

    #[test]
    fn period_summary_totals() {
        let mut outside = tx(5, 999_999, TransactionKind::Income, Some(1));
        outside.date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let transactions = [
            tx(1, 4_000, TransactionKind::Expense, Some(2)),
            tx(2, 500_000, TransactionKind::Income, Some(1)),
            outside,
        ];

        let summary =
            summarize_period(Period::new(5, 2025), &transactions, &categories(), Currency::Brl)
                .unwrap();

        assert_eq!(summary.total_income.minor(), 500_000);
        assert_eq!(summary.total_expense.minor(), 4_000);
        assert_eq!(summary.net.minor(), 496_000);
        assert_eq!(summary.by_category.len(), 2);
    }

    #[test]
    fn period_summary_rejects_invalid_period() {
        assert!(matches!(
            summarize_period(Period::new(0, 2025), &[], &[], Currency::Brl),
            Err(EngineError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn mixed_currencies_in_a_bucket_fail() {
        let mut usd = tx(2, 100, TransactionKind::Expense, Some(2));
        usd.amount = MonetaryAmount::new(100, Currency::Usd);
        let transactions = [tx(1, 100, TransactionKind::Expense, Some(2)), usd];

        assert!(matches!(
            breakdown_by_category(&transactions, &categories()),
            Err(EngineError::InvalidCurrencyMix { .. })
        ));
    }
}
