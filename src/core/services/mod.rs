pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{CategorySlice, SummaryService, SummaryStats, CHART_COLORS};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Transaction not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
}
