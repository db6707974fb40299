use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used by bank balances, vaults and every money
/// value of a snapshot.
///
/// `Brl` is the default and the usual primary currency: bank balances are
/// expressed in it, while vaults may hold any supported currency.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see
/// `MoneyCents`). Every supported currency uses 2 fraction digits, so
/// `10,50 BRL` ⇄ `1050`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
    Gbp,
}

/// Locale conventions applied when rendering an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberStyle {
    pub symbol: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space sits between the symbol and the digits (`R$ 10,00`).
    pub spaced_symbol: bool,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl | Currency::Usd | Currency::Eur | Currency::Gbp => 2,
        }
    }

    /// Formatting locale for this currency.
    ///
    /// BRL follows `pt-BR` (decimal comma, grouping dot). The others follow
    /// the English convention (decimal point, grouping comma).
    #[must_use]
    pub const fn style(self) -> NumberStyle {
        match self {
            Currency::Brl => NumberStyle {
                symbol: "R$",
                decimal_separator: ',',
                grouping_separator: '.',
                spaced_symbol: true,
            },
            Currency::Usd => NumberStyle {
                symbol: "$",
                decimal_separator: '.',
                grouping_separator: ',',
                spaced_symbol: false,
            },
            Currency::Eur => NumberStyle {
                symbol: "€",
                decimal_separator: '.',
                grouping_separator: ',',
                spaced_symbol: false,
            },
            Currency::Gbp => NumberStyle {
                symbol: "£",
                decimal_separator: '.',
                grouping_separator: ',',
                spaced_symbol: false,
            },
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Currency::try_from(" usd ").unwrap(), Currency::Usd);
        assert_eq!("brl".parse::<Currency>().unwrap(), Currency::Brl);
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(
            Currency::try_from("xyz"),
            Err(EngineError::UnsupportedCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn serde_uses_uppercase_codes() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        assert_eq!(
            serde_json::from_str::<Currency>("\"GBP\"").unwrap(),
            Currency::Gbp
        );
    }
}
