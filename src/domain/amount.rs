use super::asset::Asset;
use crate::error::{AnchorError, Result, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum total digits accepted in a submitted amount.
pub const MAX_DIGITS: u32 = 30;
/// Maximum fractional digits accepted in a submitted amount.
pub const MAX_DECIMAL_PLACES: u32 = 7;

/// A non-negative amount as submitted through a form field.
///
/// Enforces the input shape only (sign, digit counts). Asset bounds are
/// checked separately by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> std::result::Result<Self, ValidationError> {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount);
        }

        // Trailing zeros carry no information and do not count.
        let normalized = value.normalize();
        let decimals = normalized.scale();
        let significant = normalized.mantissa().unsigned_abs().to_string().len() as u32;
        let digits = significant.max(decimals);
        let whole_digits = digits - decimals;

        if digits > MAX_DIGITS {
            Err(ValidationError::TooManyDigits { max: MAX_DIGITS })
        } else if decimals > MAX_DECIMAL_PLACES {
            Err(ValidationError::TooManyDecimalPlaces {
                max: MAX_DECIMAL_PLACES,
            })
        } else if whole_digits > MAX_DIGITS - MAX_DECIMAL_PLACES {
            Err(ValidationError::TooManyWholeDigits {
                max: MAX_DIGITS - MAX_DECIMAL_PLACES,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Parses raw form text. Surrounding whitespace is ignored.
    ///
    /// Digit limits are checked on the text first, since `Decimal` parsing
    /// silently rounds away fractional digits beyond its 28-digit scale.
    pub fn parse(raw: &str) -> std::result::Result<Self, ValidationError> {
        let text = raw.trim();
        check_digits(text)?;
        let value = Decimal::from_str(text).map_err(|_| ValidationError::InvalidAmount)?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Applies the digit limits to decimal text, ignoring sign, leading zeros of
/// the whole part and trailing zeros of the fraction.
fn check_digits(text: &str) -> std::result::Result<(), ValidationError> {
    let digits_of = |part: &str| -> String { part.chars().filter(char::is_ascii_digit).collect() };
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let whole = digits_of(whole);
    let fraction = digits_of(fraction);
    let whole_digits = whole.trim_start_matches('0').len() as u32;
    let decimals = fraction.trim_end_matches('0').len() as u32;

    if whole_digits + decimals > MAX_DIGITS {
        Err(ValidationError::TooManyDigits { max: MAX_DIGITS })
    } else if decimals > MAX_DECIMAL_PLACES {
        Err(ValidationError::TooManyDecimalPlaces {
            max: MAX_DECIMAL_PLACES,
        })
    } else if whole_digits > MAX_DIGITS - MAX_DECIMAL_PLACES {
        Err(ValidationError::TooManyWholeDigits {
            max: MAX_DIGITS - MAX_DECIMAL_PLACES,
        })
    } else {
        Ok(())
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Checks `amount` against the asset's deposit bounds.
///
/// Returns the amount rounded half-to-even to `asset.significant_decimals`,
/// which is the same value the presenter would display. Both bounds are
/// rounded to the same precision before comparing.
///
/// # Errors
///
/// * [`ValidationError::BelowMinimum`] / [`ValidationError::AboveMaximum`]
///   carrying the rounded bound.
/// * [`AnchorError::MissingAssetContext`] when `asset` is `None`. This is a
///   caller bug, not bad user input.
pub fn validate(amount: Decimal, asset: Option<&Asset>) -> Result<Decimal> {
    let asset = asset.ok_or(AnchorError::MissingAssetContext)?;
    let minimum = asset.min_amount()?;
    let maximum = asset.max_amount()?;

    // An amount too large to carry the asset's scale lies beyond both
    // representable bounds.
    let Ok(rounded) = asset.round(amount) else {
        return Err(if amount < Decimal::ZERO {
            ValidationError::BelowMinimum { minimum }
        } else {
            ValidationError::AboveMaximum { maximum }
        }
        .into());
    };

    if rounded < minimum {
        return Err(ValidationError::BelowMinimum { minimum }.into());
    }
    if rounded > maximum {
        return Err(ValidationError::AboveMaximum { maximum }.into());
    }
    Ok(rounded)
}
