use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Currency, DEFAULT_NEAR_DUE_WINDOW, Period, TransactionKind};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/patrimonio.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub email: String,
    /// Read from the config file or `PATRIMONIO_PASSWORD`, never from the CLI.
    pub password: Option<String>,
    /// Bearer token of an existing session; skips the login.
    pub token: Option<String>,
    /// Currency of bank balances, card limits and transactions.
    pub currency: String,
    pub level: String,
    pub near_due_window: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            email: String::new(),
            password: None,
            token: None,
            currency: Currency::Brl.code().to_string(),
            level: "info".to_string(),
            near_due_window: DEFAULT_NEAR_DUE_WINDOW,
        }
    }
}

impl AppConfig {
    pub fn primary_currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "patrimonio", disable_version_flag = true)]
#[command(about = "Personal finance overview from the terminal")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override email (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Income, expenses and category breakdown of a month.
    Summary(PeriodArgs),
    /// Banks, vaults and totals per currency.
    Accounts,
    /// Recurring items and credit cards falling due soon.
    Recurring(RecurringArgs),
    /// Writes the month's transactions as CSV.
    Export(ExportArgs),
    /// Records an income or expense.
    AddTransaction(AddTransactionArgs),
    AddBank(AddBankArgs),
}

#[derive(Debug, Args)]
pub struct PeriodArgs {
    /// 1..=12, defaults to the current month.
    #[arg(long)]
    pub month: Option<u32>,
    /// Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
}

impl PeriodArgs {
    pub fn resolve(&self, today: NaiveDate) -> Result<Period> {
        let current = Period::from_date(today);
        let period = Period::new(
            self.month.unwrap_or(current.month),
            self.year.unwrap_or(current.year),
        );
        period.validate()?;
        Ok(period)
    }
}

#[derive(Debug, Args)]
pub struct RecurringArgs {
    /// Days ahead that count as near due.
    #[arg(long)]
    pub window: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Output file, stdout when omitted.
    #[arg(long, short)]
    pub output: Option<std::path::PathBuf>,
}

#[derive(Debug, Args)]
pub struct AddTransactionArgs {
    /// Typed like a keypad: only digits count and the last two are cents
    /// ("1234" and "12,34" both mean 12.34).
    pub amount: String,
    #[arg(long, value_parser = parse_kind, default_value = "expense")]
    pub kind: TransactionKind,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub bank: Option<i64>,
    #[arg(long)]
    pub vault: Option<i64>,
    #[arg(long)]
    pub card: Option<i64>,
    #[arg(long)]
    pub description: Option<String>,
    /// Splits a card purchase into monthly installments.
    #[arg(long)]
    pub installments: Option<u32>,
}

#[derive(Debug, Args)]
pub struct AddBankArgs {
    pub name: String,
    /// Hex color, e.g. #820ad1.
    #[arg(long)]
    pub color: Option<String>,
}

fn parse_kind(raw: &str) -> std::result::Result<TransactionKind, engine::EngineError> {
    TransactionKind::try_from(raw.trim().to_ascii_lowercase().as_str())
}

pub fn load() -> Result<(AppConfig, Command)> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PATRIMONIO"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = cli.email {
        settings.email = email;
    }
    if let Some(level) = cli.level {
        settings.level = level;
    }

    Ok((settings, cli.command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_add_transaction() {
        let cli = Cli::try_parse_from([
            "patrimonio",
            "--email",
            "ana@example.com",
            "add-transaction",
            "12,34",
            "--kind",
            "Income",
            "--date",
            "2025-03-01",
        ])
        .unwrap();

        assert_eq!(cli.email.as_deref(), Some("ana@example.com"));
        let Command::AddTransaction(args) = cli.command else {
            panic!("expected add-transaction");
        };
        assert_eq!(args.amount, "12,34");
        assert_eq!(args.kind, TransactionKind::Income);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn period_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let args = PeriodArgs {
            month: None,
            year: None,
        };
        assert_eq!(args.resolve(today).unwrap(), Period::new(7, 2025));

        let args = PeriodArgs {
            month: Some(13),
            year: None,
        };
        assert!(args.resolve(today).is_err());
    }

    #[test]
    fn unknown_currency_is_reported() {
        let settings = AppConfig {
            currency: "xyz".to_string(),
            ..AppConfig::default()
        };
        assert!(settings.primary_currency().is_err());
        assert_eq!(
            AppConfig::default().primary_currency().unwrap(),
            Currency::Brl
        );
    }
}
