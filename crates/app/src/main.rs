use api_types::{bank::BankCreate, transaction::TransactionCreate};
use chrono::{Local, NaiveDate};
use client::{Client, Credentials, WriteOutcome, WriteRequest, convert};
use engine::{
    Currency, EngineError, MonetaryAmount, MoneyCents, Period, summarize_accounts,
    summarize_credit_cards, upcoming_due,
};
use error::{AppError, Result};
use settings::{AddBankArgs, AddTransactionArgs, AppConfig, Command};

mod error;
mod render;
mod settings;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (settings, command) = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "patrimonio={level},client={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let primary = settings.primary_currency()?;
    let client = connect(&settings).await?;
    let today = Local::now().date_naive();

    run(&client, &settings, primary, today, command).await?;
    Ok(())
}

/// Builds the API client, logging in when no token is configured.
async fn connect(settings: &AppConfig) -> Result<Client> {
    if let Some(token) = &settings.token {
        return Ok(Client::with_credentials(
            &settings.base_url,
            Credentials::with_token(token.clone()),
        )?);
    }

    if settings.email.is_empty() {
        return Err(AppError::MissingCredentials(
            "set an email (--email or PATRIMONIO_EMAIL) or a token",
        ));
    }
    let Some(password) = &settings.password else {
        return Err(AppError::MissingCredentials("set PATRIMONIO_PASSWORD"));
    };

    let client = Client::new(&settings.base_url)?;
    client.login(&settings.email, password).await?;
    Ok(client)
}

async fn run(
    client: &Client,
    settings: &AppConfig,
    primary: Currency,
    today: NaiveDate,
    command: Command,
) -> Result<()> {
    match command {
        Command::Summary(args) => {
            let period = args.resolve(today)?;
            let (snapshot, server) = tokio::try_join!(
                client.fetch_snapshot(period, primary),
                client.dashboard_summary(period),
            )?;
            let dashboard = snapshot.dashboard(today, primary, settings.near_due_window)?;

            let server_net = MoneyCents::from_major_f64(server.net)?;
            if server_net != dashboard.summary.net.cents() {
                tracing::warn!(
                    local = %dashboard.summary.net,
                    server = %MonetaryAmount::new(server_net, primary),
                    "net of {period} differs from the server summary"
                );
            }

            print!("{}", render::dashboard(&dashboard, &snapshot.credit_cards));
        }
        Command::Accounts => {
            let (banks, vaults, cards) = tokio::try_join!(
                client.list_banks(),
                client.list_vaults(),
                client.list_credit_cards(),
            )?;
            let banks = banks
                .into_iter()
                .map(|row| convert::bank(row, primary))
                .collect::<engine::ResultEngine<Vec<_>>>()?;
            let vaults = vaults
                .into_iter()
                .map(convert::vault)
                .collect::<engine::ResultEngine<Vec<_>>>()?;
            let cards = cards
                .into_iter()
                .map(|row| convert::credit_card(row, primary))
                .collect::<engine::ResultEngine<Vec<_>>>()?;

            let summary = summarize_accounts(&banks, &vaults, primary)?;
            let overview = summarize_credit_cards(&cards, today, settings.near_due_window)?;
            print!("{}", render::accounts(&summary));
            print!("{}", render::card_limits(&overview));
        }
        Command::Recurring(args) => {
            let window = args.window.unwrap_or(settings.near_due_window);
            let (items, cards) =
                tokio::try_join!(client.list_recurring(), client.list_credit_cards())?;
            let items = items
                .into_iter()
                .map(|row| convert::recurring(row, primary))
                .collect::<engine::ResultEngine<Vec<_>>>()?;
            let cards = cards
                .into_iter()
                .map(|row| convert::credit_card(row, primary))
                .collect::<engine::ResultEngine<Vec<_>>>()?;

            let due = upcoming_due(&items, today, window);
            let overview = summarize_credit_cards(&cards, today, window)?;
            let due_cards: Vec<_> = cards
                .iter()
                .filter(|card| overview.near_due.contains(&card.id))
                .collect();
            print!("{}", render::upcoming(&due, &due_cards));
        }
        Command::Export(args) => {
            let period = args.period.resolve(today)?;
            let csv = client.export_csv(period).await?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    tracing::info!("exported {period} to {}", path.display());
                }
                None => print!("{csv}"),
            }
        }
        Command::AddTransaction(args) => {
            let request = transaction_request(args, primary, today)?;
            if let WriteOutcome::Transaction(tx) = client.execute(request).await? {
                let amount = MonetaryAmount::new(MoneyCents::from_major_f64(tx.amount)?, primary);
                println!("created transaction {} of {amount} on {}", tx.id, tx.date);
            }
        }
        Command::AddBank(AddBankArgs { name, color }) => {
            let request = WriteRequest::CreateBank(BankCreate {
                name,
                icon_color: color,
            });
            if let WriteOutcome::Bank(bank) = client.execute(request).await? {
                println!("created bank {} ({})", bank.name, bank.id);
            }
        }
    }
    Ok(())
}

fn transaction_request(
    args: AddTransactionArgs,
    primary: Currency,
    today: NaiveDate,
) -> Result<WriteRequest> {
    let amount = MonetaryAmount::parse_user_input(&args.amount, primary)?;
    if amount.is_zero() {
        return Err(EngineError::InvalidAmount(format!("no amount in {:?}", args.amount)).into());
    }
    let date = args.date.unwrap_or(today);
    // Keeps an obviously wrong date from being sent.
    Period::from_date(date).validate()?;

    Ok(WriteRequest::CreateTransaction(TransactionCreate {
        amount: amount.cents().to_major_f64(),
        kind: convert::entry_type(args.kind),
        category_id: args.category,
        bank_id: args.bank,
        vault_id: args.vault,
        credit_card_id: args.card,
        date,
        description: args.description,
        installments: args.installments,
    }))
}

#[cfg(test)]
mod tests {
    use engine::TransactionKind;

    use super::*;

    fn args(amount: &str) -> AddTransactionArgs {
        AddTransactionArgs {
            amount: amount.to_string(),
            kind: TransactionKind::Expense,
            date: None,
            category: Some(2),
            bank: None,
            vault: None,
            card: Some(5),
            description: None,
            installments: Some(3),
        }
    }

    #[test]
    fn keypad_amount_becomes_major_units() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        let WriteRequest::CreateTransaction(body) =
            transaction_request(args("R$ 1.234,56"), Currency::Brl, today).unwrap()
        else {
            panic!("expected a transaction");
        };

        assert_eq!(body.amount, 1234.56);
        assert_eq!(body.date, today);
        assert_eq!(body.installments, Some(3));
    }

    #[test]
    fn amount_without_digits_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(matches!(
            transaction_request(args("abc"), Currency::Brl, today),
            Err(AppError::Engine(_))
        ));
    }
}
