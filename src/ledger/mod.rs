//! Ledger domain models and persistence-friendly types.

pub mod context;
pub mod transaction;

pub use context::{Context, PaymentMethod, INCOME_CATEGORY};
pub use transaction::{EntryKind, NewTransaction, Transaction, TransactionType};
