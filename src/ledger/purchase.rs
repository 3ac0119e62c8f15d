use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::term;
use crate::currency::{round_money, ExchangeRate, MAX_AMOUNT};
use crate::errors::ValidationError;

pub type PurchaseId = Uuid;

/// A recorded earning unit. EUR figures and the expiry are derived on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(default)]
    pub id: PurchaseId,
    pub date: NaiveDate,
    #[serde(rename = "purchaseAmount", with = "rust_decimal::serde::str")]
    pub purchase_usd: Decimal,
    #[serde(rename = "purchaseInEUR", with = "rust_decimal::serde::str")]
    pub purchase_eur: Decimal,
    #[serde(rename = "earningAmount", with = "rust_decimal::serde::str")]
    pub earning_usd: Decimal,
    #[serde(rename = "earningInEUR", with = "rust_decimal::serde::str")]
    pub earning_eur: Decimal,
    #[serde(rename = "expiryDate")]
    pub expiry_date: NaiveDate,
}

impl Purchase {
    /// Builds a record from validated input, freezing EUR values at `rate`.
    pub fn from_input(id: PurchaseId, input: &PurchaseInput, rate: ExchangeRate) -> Self {
        Self {
            id,
            date: input.date,
            purchase_usd: input.purchase_usd,
            purchase_eur: rate.to_eur(input.purchase_usd),
            earning_usd: input.earning_usd,
            earning_eur: rate.to_eur(input.earning_usd),
            expiry_date: input.expiry_date,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }

    /// Form values that reproduce this record when submitted again.
    pub fn to_form(&self) -> PurchaseForm {
        PurchaseForm {
            date: self.date.format("%Y-%m-%d").to_string(),
            purchase_amount: self.purchase_usd.to_string(),
            earning_amount: self.earning_usd.to_string(),
        }
    }
}

/// Raw user input as typed into the add/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseForm {
    pub date: String,
    pub purchase_amount: String,
    pub earning_amount: String,
}

impl PurchaseForm {
    pub fn new(
        date: impl Into<String>,
        purchase_amount: impl Into<String>,
        earning_amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            purchase_amount: purchase_amount.into(),
            earning_amount: earning_amount.into(),
        }
    }

    pub fn validate(&self) -> Result<PurchaseInput, ValidationError> {
        let date = parse_date(&self.date)?;
        let purchase_usd = parse_amount("purchase amount", &self.purchase_amount)?;
        let earning_usd = parse_amount("earning amount", &self.earning_amount)?;
        let expiry_date = term::expiry_date(date)
            .ok_or_else(|| ValidationError::DateOutOfRange(date.to_string()))?;
        Ok(PurchaseInput {
            date,
            purchase_usd,
            earning_usd,
            expiry_date,
        })
    }
}

/// Validated form contents, amounts already rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseInput {
    pub date: NaiveDate,
    pub purchase_usd: Decimal,
    pub earning_usd: Decimal,
    pub expiry_date: NaiveDate,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("date"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    let value = Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidAmount {
        field,
        value: trimmed.to_string(),
    })?;
    if value.is_zero() {
        return Ok(round_money(Decimal::ZERO));
    }
    if value.is_sign_negative() {
        return Err(ValidationError::NegativeAmount(field));
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field,
            max: MAX_AMOUNT,
        });
    }
    Ok(round_money(value))
}
