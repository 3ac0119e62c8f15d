use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Index {index} is out of range (ledger holds {len} purchases)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Purchase {0} no longer exists")]
    PurchaseNotFound(Uuid),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Rejected purchase form input. No state is changed when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields correctly: {0} is required")]
    MissingField(&'static str),
    #[error("Please fill in all fields correctly: invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Please fill in all fields correctly: {field} `{value}` is not a number")]
    InvalidAmount { field: &'static str, value: String },
    #[error("Please fill in all fields correctly: {0} cannot be negative")]
    NegativeAmount(&'static str),
    #[error("Please fill in all fields correctly: {field} cannot exceed {max}")]
    AmountTooLarge { field: &'static str, max: Decimal },
    #[error("Date {0} is too far in the future to hold a full term")]
    DateOutOfRange(String),
}

/// Fatal shell errors that end the CLI session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(LedgerError::Io(err))
    }
}
