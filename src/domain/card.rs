use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;

/// A card number that passed normalization and the Luhn check.
///
/// Holds only ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Strips spaces and hyphens, then checks format and checksum.
    pub fn validate(raw: &str) -> Result<Self, ValidationError> {
        let digits = normalize(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat);
        }
        if luhn_checksum(&digits) != 0 {
            return Err(ValidationError::FailedChecksum);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CardNumber {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::validate(value)
    }
}

/// Removes every space and hyphen.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Luhn checksum mod 10 of an all-digit string. Zero means valid.
///
/// Non-digit bytes must be rejected by the caller first.
pub fn luhn_checksum(digits: &str) -> u32 {
    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                d
            } else {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            }
        })
        .sum();
    sum % 10
}
