use std::{fmt, ops::Neg, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine, util::ensure_same_currency};

/// Currency-less amount in minor units.
///
/// Only [`MonetaryAmount`] does arithmetic on it, and only through the
/// checked methods, so an overflow surfaces as [`EngineError::InvalidAmount`]
/// instead of a panic.
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!(MoneyCents::new(-1234).to_string(), "-12.34");
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// `None` only for `i64::MIN` cents, which has no positive counterpart.
    #[must_use]
    pub fn checked_neg(self) -> Option<MoneyCents> {
        self.0.checked_neg().map(MoneyCents)
    }

    /// Converts a major-unit float from the REST API, rounding to the
    /// nearest cent.
    ///
    /// The accepted range is symmetric around zero so every converted value
    /// can be negated.
    pub fn from_major_f64(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "non-finite amount: {value}"
            )));
        }
        let cents = (value * 100.0).round();
        // i64::MAX is not representable as f64; its nearest float is 2^63.
        let bound = i64::MAX as f64;
        if cents >= bound || cents <= -bound {
            return Err(EngineError::InvalidAmount(format!(
                "amount out of range: {value}"
            )));
        }
        Ok(MoneyCents(cents as i64))
    }

    #[must_use]
    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Decimal string in major units: optional sign, `.` or `,` as the
    /// separator and at most two fraction digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = |reason: &str| EngineError::InvalidAmount(format!("{reason}: {s:?}"));

        let trimmed = s.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed[1..].trim_start()),
            Some(b'+') => (false, trimmed[1..].trim_start()),
            _ => (false, trimmed),
        };
        let (units, fraction) = body.split_once(['.', ',']).unwrap_or((body, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !all_digits(units) || !all_digits(fraction) {
            return Err(reject("invalid amount"));
        }
        if fraction.len() > 2 {
            return Err(reject("too many decimals"));
        }

        let mut digits = units
            .bytes()
            .chain(fraction.bytes())
            .chain(std::iter::repeat_n(b'0', 2 - fraction.len()));
        let magnitude = digits
            .try_fold(0i64, |acc, b| {
                acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
            })
            .ok_or_else(|| reject("amount too large"))?;

        Ok(MoneyCents(if negative { -magnitude } else { magnitude }))
    }
}

/// A fixed-point amount tied to its currency.
///
/// Arithmetic between two amounts only succeeds when both carry the same
/// currency; anything else is an [`EngineError::InvalidCurrencyMix`].
///
/// ```rust
/// use engine::{Currency, EngineError, MonetaryAmount};
///
/// let brl = MonetaryAmount::new(1500, Currency::Brl);
/// assert_eq!(brl.format(), "R$ 15,00");
///
/// let usd = MonetaryAmount::new(100, Currency::Usd);
/// assert!(matches!(
///     brl.try_add(usd),
///     Err(EngineError::InvalidCurrencyMix { .. })
/// ));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonetaryAmount {
    cents: MoneyCents,
    currency: Currency,
}

impl MonetaryAmount {
    #[must_use]
    pub fn new(cents: impl Into<MoneyCents>, currency: Currency) -> Self {
        Self {
            cents: cents.into(),
            currency,
        }
    }

    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            cents: MoneyCents::ZERO,
            currency,
        }
    }

    #[must_use]
    pub const fn cents(&self) -> MoneyCents {
        self.cents
    }

    #[must_use]
    pub const fn minor(&self) -> i64 {
        self.cents.cents()
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.cents.is_zero()
    }

    /// Saturates at `i64::MAX` cents.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.minor().saturating_abs(), self.currency)
    }

    /// Adds two amounts of the same currency.
    pub fn try_add(self, rhs: MonetaryAmount) -> ResultEngine<MonetaryAmount> {
        ensure_same_currency(self.currency, rhs.currency)?;
        let cents = self
            .cents
            .checked_add(rhs.cents)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        Ok(Self::new(cents, self.currency))
    }

    /// Subtracts two amounts of the same currency.
    pub fn try_sub(self, rhs: MonetaryAmount) -> ResultEngine<MonetaryAmount> {
        ensure_same_currency(self.currency, rhs.currency)?;
        let cents = self
            .cents
            .checked_sub(rhs.cents)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        Ok(Self::new(cents, self.currency))
    }

    /// Sums `amounts` starting from zero in `currency`.
    pub fn try_sum<'a>(
        amounts: impl IntoIterator<Item = &'a MonetaryAmount>,
        currency: Currency,
    ) -> ResultEngine<MonetaryAmount> {
        amounts
            .into_iter()
            .try_fold(Self::zero(currency), |acc, amount| acc.try_add(*amount))
    }

    /// Renders the amount with exactly two fraction digits, grouping and the
    /// currency symbol, e.g. `R$ 1.234,56` or `$1,234.56`.
    #[must_use]
    pub fn format(&self) -> String {
        let style = self.currency.style();
        let sign = if self.cents.is_negative() { "-" } else { "" };
        let space = if style.spaced_symbol { " " } else { "" };
        format!(
            "{sign}{}{space}{}",
            style.symbol,
            format_digits(self.cents.cents().unsigned_abs(), self.currency)
        )
    }

    /// Like [`format`](Self::format) but without the currency symbol.
    #[must_use]
    pub fn format_number(&self) -> String {
        let sign = if self.cents.is_negative() { "-" } else { "" };
        format!(
            "{sign}{}",
            format_digits(self.cents.cents().unsigned_abs(), self.currency)
        )
    }

    /// Interprets keystrokes as a stream of digits in minor units.
    ///
    /// Every non-digit character is discarded, so `"R$ 15,00"`, `"15.00"` and
    /// `"1500"` all parse to 15.00. Input without digits is zero.
    ///
    /// ```rust
    /// use engine::{Currency, MonetaryAmount};
    ///
    /// let amount = MonetaryAmount::parse_user_input("1.5a00", Currency::Brl).unwrap();
    /// assert_eq!(amount.minor(), 1500);
    /// ```
    pub fn parse_user_input(raw: &str, currency: Currency) -> ResultEngine<MonetaryAmount> {
        let cents = raw
            .chars()
            .filter_map(|c| c.to_digit(10))
            .try_fold(0i64, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i64::from(digit))
            })
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        Ok(Self::new(cents, currency))
    }
}

impl Neg for MonetaryAmount {
    type Output = MonetaryAmount;

    /// Saturates at `i64::MAX` cents.
    fn neg(self) -> Self::Output {
        Self::new(self.minor().saturating_neg(), self.currency)
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Formats an optional amount; an absent value renders as an empty string.
#[must_use]
pub fn format_optional(amount: Option<&MonetaryAmount>) -> String {
    amount.map(MonetaryAmount::format).unwrap_or_default()
}

/// Formats a raw decimal string (`"1234.5"`, `"10,00"`) in `currency`.
///
/// Returns an empty string when `raw` is not a valid amount.
#[must_use]
pub fn format_raw(raw: &str, currency: Currency) -> String {
    match raw.parse::<MoneyCents>() {
        Ok(cents) => MonetaryAmount::new(cents, currency).format(),
        Err(_) => String::new(),
    }
}

/// Live formatter for a money input field: keeps only the digits typed so
/// far and renders them as minor units.
///
/// Returns an empty string when nothing numeric was typed.
#[must_use]
pub fn format_user_input(raw: &str, currency: Currency) -> String {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }
    MonetaryAmount::parse_user_input(raw, currency)
        .map(|amount| amount.format())
        .unwrap_or_default()
}

/// Grouped value without symbol; an absent value renders as zero.
#[must_use]
pub fn format_number(amount: Option<&MonetaryAmount>, currency: Currency) -> String {
    amount
        .copied()
        .unwrap_or_else(|| MonetaryAmount::zero(currency))
        .format_number()
}

fn format_digits(abs_minor: u64, currency: Currency) -> String {
    let style = currency.style();
    let width = usize::from(currency.minor_units());
    let scale = 10u64.pow(u32::from(currency.minor_units()));
    let units = (abs_minor / scale).to_string();
    let fraction = abs_minor % scale;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(style.grouping_separator);
        }
        grouped.push(digit);
    }

    if width == 0 {
        return grouped;
    }
    format!(
        "{grouped}{}{fraction:0width$}",
        style.decimal_separator
    )
}
