use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// A user-correctable problem with submitted form data.
///
/// These map one-to-one to field-level errors; message text is owned by the
/// caller's localization layer, so the `Display` output here is only a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("card number must contain only digits")]
    InvalidFormat,
    #[error("card number failed checksum")]
    FailedChecksum,
    #[error("the minimum amount is: {minimum}")]
    BelowMinimum { minimum: Decimal },
    #[error("the maximum amount is: {maximum}")]
    AboveMaximum { maximum: Decimal },
    #[error("enter a number")]
    InvalidAmount,
    #[error("amount must be greater than or equal to 0")]
    NegativeAmount,
    #[error("ensure that there are no more than {max} digits in total")]
    TooManyDigits { max: u32 },
    #[error("ensure that there are no more than {max} digits before the decimal point")]
    TooManyWholeDigits { max: u32 },
    #[error("ensure that there are no more than {max} decimal places")]
    TooManyDecimalPlaces { max: u32 },
    #[error("{field} is required")]
    Required { field: &'static str },
}

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("validator invoked without a resolved asset")]
    MissingAssetContext,
    #[error("unable to construct more_info_url: no request context")]
    MissingRenderContext,
    #[error("transaction {transaction} uses asset {found}, batch is bound to {expected}")]
    AssetMismatch {
        expected: String,
        found: String,
        transaction: Uuid,
    },
    #[error("asset {0} not found")]
    AssetNotFound(String),
    #[error("transaction {0} not found")]
    TransactionNotFound(Uuid),
    #[error("invalid asset {code}: {reason}")]
    InvalidAsset { code: String, reason: String },
    #[error("{value} cannot be shown with {decimals} decimal places")]
    PrecisionOverflow { value: Decimal, decimals: u32 },
    #[error("invalid render context: {0}")]
    InvalidRenderContext(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AnchorError {
    /// True for errors the submitting user can fix by changing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

pub type Result<T> = std::result::Result<T, AnchorError>;
