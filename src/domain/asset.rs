use crate::error::{AnchorError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest precision an asset may declare. Matches the 7 decimal places
/// amounts are stored with, and keeps every amount of up to 21 whole digits
/// representable at full scale.
pub const MAX_SIGNIFICANT_DECIMALS: u32 = 7;

/// Asset metadata needed to validate and display amounts.
///
/// Owned by the storage layer; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset code, e.g. `USDC`. Two assets are the same asset iff their codes match.
    pub code: String,
    pub issuer: Option<String>,
    /// Fractional digits used for rounding and display.
    pub significant_decimals: u32,
    pub deposit_min_amount: Decimal,
    pub deposit_max_amount: Decimal,
}

impl Asset {
    /// Builds an asset, checking the bounds invariant.
    pub fn new(
        code: impl Into<String>,
        significant_decimals: u32,
        deposit_min_amount: Decimal,
        deposit_max_amount: Decimal,
    ) -> Result<Self> {
        let asset = Self {
            code: code.into(),
            issuer: None,
            significant_decimals,
            deposit_min_amount,
            deposit_max_amount,
        };
        asset.check()?;
        Ok(asset)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Verifies `0 <= min <= max` and that the precision is representable.
    ///
    /// Records coming from a reader are checked here before use.
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: &str| AnchorError::InvalidAsset {
            code: self.code.clone(),
            reason: reason.to_string(),
        };
        if self.significant_decimals > MAX_SIGNIFICANT_DECIMALS {
            return Err(invalid("significant_decimals exceeds 7"));
        }
        if self.deposit_min_amount < Decimal::ZERO || self.deposit_max_amount < Decimal::ZERO {
            return Err(invalid("deposit bounds must be non-negative"));
        }
        if self.deposit_min_amount > self.deposit_max_amount {
            return Err(invalid("deposit_min_amount exceeds deposit_max_amount"));
        }
        if self.min_amount().is_err() || self.max_amount().is_err() {
            return Err(invalid("deposit bounds too large for significant_decimals"));
        }
        Ok(())
    }

    /// Rounds `value` to this asset's precision.
    pub fn round(&self, value: Decimal) -> Result<Decimal> {
        round_to(value, self.significant_decimals)
    }

    pub fn min_amount(&self) -> Result<Decimal> {
        self.round(self.deposit_min_amount)
    }

    pub fn max_amount(&self) -> Result<Decimal> {
        self.round(self.deposit_max_amount)
    }

    pub fn same_asset(&self, code: &str) -> bool {
        self.code == code
    }
}

/// Round-half-to-even to `dp` places, padded so the result always carries
/// exactly `dp` fractional digits (`10` at 2 places is `10.00`).
///
/// Validation and presentation both go through this function. Fails with
/// [`AnchorError::PrecisionOverflow`] when `value` has too many whole digits
/// to carry `dp` fractional digits.
pub fn round_to(value: Decimal, dp: u32) -> Result<Decimal> {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    if rounded.scale() != dp {
        return Err(AnchorError::PrecisionOverflow {
            value,
            decimals: dp,
        });
    }
    Ok(rounded)
}
