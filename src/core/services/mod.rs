pub mod purchase_service;
pub mod summary_service;

pub use purchase_service::{PurchaseService, SaveOutcome};
pub use summary_service::{MoneyPair, Summary, SummaryService};

use crate::errors::{LedgerError, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
