use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Number of minor units kept for every stored and displayed amount.
pub const MONEY_SCALE: u32 = 2;

/// USD to EUR multiplier used when a session does not configure one.
pub const DEFAULT_EXCHANGE_RATE: Decimal = dec!(0.91);

/// Largest purchase or earning amount accepted from user input.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// The two currencies a purchase is recorded in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CurrencyCode {
    Usd,
    Eur,
}

impl CurrencyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "€",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed USD to EUR rate applied at write time. Always strictly positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Result<Self, LedgerError> {
        if rate <= Decimal::ZERO {
            return Err(LedgerError::Config(format!(
                "exchange rate must be positive, got {rate}"
            )));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts a USD amount to EUR, rounded to cents.
    pub fn to_eur(&self, usd: Decimal) -> Decimal {
        round_money(usd.saturating_mul(self.0))
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(DEFAULT_EXCHANGE_RATE)
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Rounds half away from zero to cents and pins the scale, so `12` becomes `12.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

pub fn format_amount(amount: Decimal, code: CurrencyCode) -> String {
    format!("{}{}", code.symbol(), round_money(amount))
}

/// Renders a USD/EUR pair as `$x.xx / €y.yy`.
pub fn format_pair(usd: Decimal, eur: Decimal) -> String {
    format!(
        "{} / {}",
        format_amount(usd, CurrencyCode::Usd),
        format_amount(eur, CurrencyCode::Eur)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_money_rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(0.125)).to_string(), "0.13");
        assert_eq!(round_money(dec!(0.135)).to_string(), "0.14");
        assert_eq!(round_money(dec!(12)).to_string(), "12.00");
    }

    #[test]
    fn rate_converts_and_rounds() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.to_eur(dec!(10.00)), dec!(9.10));
        assert_eq!(rate.to_eur(dec!(0.55)).to_string(), "0.50");
    }

    #[test]
    fn rate_rejects_non_positive_values() {
        assert!(ExchangeRate::new(Decimal::ZERO).is_err());
        assert!(ExchangeRate::new(dec!(-1)).is_err());
    }

    #[test]
    fn formats_pairs_with_symbols() {
        assert_eq!(format_pair(dec!(600), dec!(546)), "$600.00 / €546.00");
    }
}
