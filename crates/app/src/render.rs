//! Plain-text views printed by the commands.
//!
//! Every view is built as a list of lines and terminated with a newline.

use engine::{
    AccountSummary, CreditCard, CreditCardOverview, Dashboard, PeriodSummary, RecurringItem,
    format_optional,
};

fn lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn summary(summary: &PeriodSummary) -> String {
    let mut out = vec![
        format!("Period {}", summary.period),
        format!("  income   {}", summary.total_income.format()),
        format!("  expense  {}", summary.total_expense.format()),
        format!("  net      {}", summary.net.format()),
    ];

    if !summary.by_category.is_empty() {
        out.push("By category".to_string());
        out.extend(
            summary
                .by_category
                .iter()
                .map(|bucket| format!("  {:<24} {}", bucket.label, bucket.total.format())),
        );
    }
    lines(out)
}

pub fn accounts(accounts: &AccountSummary) -> String {
    let vault_line = |name: &str, balance: String| format!("  {name:<26} {balance}");

    let mut out = Vec::new();
    for entry in &accounts.bank_balances {
        out.push(format!("{:<28} {}", entry.bank.name, entry.balance.format()));
        out.extend(
            accounts
                .vaults_for(entry.bank.id)
                .iter()
                .map(|vault| vault_line(&vault.name, vault.balance.format())),
        );
    }
    if !accounts.orphan_vaults.is_empty() {
        out.push("Without bank".to_string());
        out.extend(
            accounts
                .orphan_vaults
                .iter()
                .map(|vault| vault_line(&vault.name, vault.balance.format())),
        );
    }

    out.push(format!("Patrimony {}", accounts.patrimony().format()));
    out.extend(
        accounts
            .total_by_currency
            .iter()
            .filter(|(currency, _)| **currency != accounts.primary_currency)
            .map(|(currency, total)| format!("  in {currency} {}", total.format())),
    );
    lines(out)
}

pub fn card_limits(overview: &CreditCardOverview) -> String {
    lines(
        overview
            .limit_by_currency
            .values()
            .map(|total| format!("Card limits {}", total.format()))
            .collect(),
    )
}

pub fn upcoming(items: &[&RecurringItem], cards: &[&CreditCard]) -> String {
    if items.is_empty() && cards.is_empty() {
        return "Nothing due soon\n".to_string();
    }

    let recurring = items.iter().map(|item| {
        format!(
            "day {:>2}  {:<24} {} ({})",
            item.day_of_month,
            item.description.as_deref().unwrap_or("Recurring"),
            format_optional(Some(&item.amount)),
            item.kind.as_str()
        )
    });
    let bills = cards
        .iter()
        .map(|card| format!("day {:>2}  {:<24} card bill", card.due_day, card.name));
    lines(recurring.chain(bills).collect())
}

/// Period summary, accounts and what falls due soon. `cards` resolves the
/// ids in `dashboard.credit_cards.near_due` to names.
pub fn dashboard(dashboard: &Dashboard, cards: &[CreditCard]) -> String {
    let items: Vec<&RecurringItem> = dashboard.upcoming.iter().collect();
    let due_cards: Vec<&CreditCard> = cards
        .iter()
        .filter(|card| dashboard.credit_cards.near_due.contains(&card.id))
        .collect();

    [
        summary(&dashboard.summary),
        accounts(&dashboard.accounts),
        card_limits(&dashboard.credit_cards),
        format!("Due soon\n{}", upcoming(&items, &due_cards)),
    ]
    .join("\n")
}
