use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    Currency, CreditCardId, MonetaryAmount, ResultEngine, recurring::is_day_near,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    pub name: String,
    pub limit: MonetaryAmount,
    /// 1..=31
    pub closing_day: u32,
    /// 1..=31
    pub due_day: u32,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreditCardOverview {
    pub limit_by_currency: BTreeMap<Currency, MonetaryAmount>,
    /// Cards whose due day is near, same rule as recurring items.
    pub near_due: Vec<CreditCardId>,
}

pub fn summarize_credit_cards(
    cards: &[CreditCard],
    reference: NaiveDate,
    window_days: u32,
) -> ResultEngine<CreditCardOverview> {
    let mut overview = CreditCardOverview::default();
    for card in cards {
        let currency = card.limit.currency();
        let current = overview
            .limit_by_currency
            .get(&currency)
            .copied()
            .unwrap_or_else(|| MonetaryAmount::zero(currency));
        overview
            .limit_by_currency
            .insert(currency, current.try_add(card.limit)?);

        if is_day_near(card.due_day, reference, window_days) {
            overview.near_due.push(card.id);
        }
    }
    Ok(overview)
}
