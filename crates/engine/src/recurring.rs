//! Recurring incomes/expenses and the near-due heuristic.
//!
//! Near-due compares days of month only. A bill due on day 2 is never near
//! due while today is day 30, even though the due date is 3 days away in the
//! next month. Month-end rollover is a known limitation kept on purpose until
//! the product decides otherwise.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    BankId, CategoryId, CreditCardId, MonetaryAmount, RecurringId, TransactionKind,
};

/// Days ahead of the due day that count as near due.
pub const DEFAULT_NEAR_DUE_WINDOW: u32 = 3;

/// Template for a periodic income/expense on a fixed day of month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecurringItem {
    pub id: RecurringId,
    pub amount: MonetaryAmount,
    pub kind: TransactionKind,
    /// 1..=31
    pub day_of_month: u32,
    pub category_id: Option<CategoryId>,
    pub bank_id: Option<BankId>,
    pub credit_card_id: Option<CreditCardId>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// `true` iff `0 <= due_day - reference.day() <= window_days`.
///
/// Pure: the reference date is always supplied by the caller.
#[must_use]
pub fn is_day_near(due_day: u32, reference: NaiveDate, window_days: u32) -> bool {
    let diff = i64::from(due_day) - i64::from(reference.day());
    (0..=i64::from(window_days)).contains(&diff)
}

/// Whether `item` falls due within `window_days` of `reference`.
#[must_use]
pub fn near_due(item: &RecurringItem, reference: NaiveDate, window_days: u32) -> bool {
    is_day_near(item.day_of_month, reference, window_days)
}

/// Active items that are near due, in input order.
#[must_use]
pub fn upcoming_due<'a>(
    items: &'a [RecurringItem],
    reference: NaiveDate,
    window_days: u32,
) -> Vec<&'a RecurringItem> {
    items
        .iter()
        .filter(|item| item.is_active && near_due(item, reference, window_days))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    fn item(id: RecurringId, day_of_month: u32) -> RecurringItem {
        RecurringItem {
            id,
            amount: MonetaryAmount::new(15_000, Currency::Brl),
            kind: TransactionKind::Expense,
            day_of_month,
            category_id: None,
            bank_id: None,
            credit_card_id: None,
            description: Some("Internet".to_string()),
            is_active: true,
        }
    }

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn within_window_is_near_due() {
        assert!(near_due(&item(1, 10), day(8), DEFAULT_NEAR_DUE_WINDOW));
        assert!(near_due(&item(1, 10), day(7), DEFAULT_NEAR_DUE_WINDOW));
        assert!(near_due(&item(1, 10), day(10), DEFAULT_NEAR_DUE_WINDOW));
    }

    #[test]
    fn outside_window_is_not_near_due() {
        assert!(!near_due(&item(1, 10), day(6), DEFAULT_NEAR_DUE_WINDOW));
        assert!(!near_due(&item(1, 10), day(11), DEFAULT_NEAR_DUE_WINDOW));
    }

    #[test]
    fn month_rollover_is_not_handled() {
        assert!(!near_due(&item(1, 5), day(30), DEFAULT_NEAR_DUE_WINDOW));
        assert!(!near_due(&item(1, 2), day(30), DEFAULT_NEAR_DUE_WINDOW));
    }

    #[test]
    fn window_is_configurable() {
        assert!(near_due(&item(1, 20), day(10), 10));
        assert!(!near_due(&item(1, 20), day(10), 9));
        assert!(near_due(&item(1, 10), day(10), 0));
    }

    #[test]
    fn upcoming_skips_inactive_items() {
        let mut paused = item(2, 9);
        paused.is_active = false;
        let items = [item(1, 9), paused, item(3, 25), item(4, 8)];

        let ids: Vec<RecurringId> = upcoming_due(&items, day(8), DEFAULT_NEAR_DUE_WINDOW)
            .iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(ids, vec![1, 4]);
    }
}
