use crate::domain::amount::{self, Amount};
use crate::domain::asset::Asset;
use crate::domain::card::CardNumber;
use crate::error::{AnchorError, Result, ValidationError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// Field name to the error raised for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, ValidationError>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Outcome of cleaning a form.
///
/// The outer `Result` carries integration errors (caller bugs); the inner one
/// carries per-field errors to show back to the user.
pub type Cleaned<T> = Result<std::result::Result<T, FormErrors>>;

/// Card details as submitted.
///
/// Only the number is validated; expiration and cvv are required but their
/// content is left to subclassing integrations.
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub name: String,
    pub card_number: String,
    pub expiration: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedCard {
    pub name: String,
    pub card_number: CardNumber,
    pub expiration: String,
    pub cvv: String,
}

fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, ValidationError::Required { field });
        None
    } else {
        Some(value.to_string())
    }
}

impl CardForm {
    pub fn clean(&self) -> std::result::Result<CleanedCard, FormErrors> {
        let mut errors = FormErrors::default();

        let name = required(&mut errors, "name", &self.name);
        let card_number = match CardNumber::validate(&self.card_number) {
            Ok(number) => Some(number),
            Err(e) => {
                errors.add("card_number", e);
                None
            }
        };
        let expiration = required(&mut errors, "expiration", &self.expiration);
        let cvv = required(&mut errors, "cvv", &self.cvv);

        match (name, card_number, expiration, cvv) {
            (Some(name), Some(card_number), Some(expiration), Some(cvv)) => Ok(CleanedCard {
                name,
                card_number,
                expiration,
                cvv,
            }),
            _ => Err(errors),
        }
    }
}

/// Amount entry for an interactive deposit or withdrawal.
///
/// `asset` is resolved by the caller from the request's `asset_code` before
/// the form is cleaned.
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub asset: Option<Asset>,
    pub amount: String,
}

impl TransactionForm {
    pub fn new(asset: Option<Asset>, amount: impl Into<String>) -> Self {
        Self {
            asset,
            amount: amount.into(),
        }
    }

    /// Parses the amount and checks it against the asset bounds.
    ///
    /// A missing asset is returned as [`AnchorError::MissingAssetContext`]
    /// rather than a field error.
    pub fn clean(&self) -> Cleaned<Decimal> {
        let mut errors = FormErrors::default();
        let parsed = match Amount::parse(&self.amount) {
            Ok(amount) => amount,
            Err(e) => {
                errors.add("amount", e);
                return Ok(Err(errors));
            }
        };

        match amount::validate(parsed.value(), self.asset.as_ref()) {
            Ok(rounded) => Ok(Ok(rounded)),
            Err(AnchorError::ValidationError(e)) => {
                errors.add("amount", e);
                Ok(Err(errors))
            }
            Err(e) => Err(e),
        }
    }
}
