//! Read helpers for listing and locating transactions.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{Context, Transaction};

/// Provides filtered, display-ordered views over a transaction list.
pub struct TransactionService;

impl TransactionService {
    /// Transactions of `context`, newest date first. Equal dates keep list order.
    pub fn for_context(transactions: &[Transaction], context: Context) -> Vec<&Transaction> {
        let mut filtered: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| txn.context == context)
            .collect();
        filtered.sort_by(|a, b| b.date.cmp(&a.date));
        filtered
    }

    /// Resolves a full identifier or a unique prefix of its hex form.
    pub fn resolve_id(transactions: &[Transaction], reference: &str) -> ServiceResult<Uuid> {
        let needle: String = reference
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if needle.is_empty() {
            return Err(ServiceError::Invalid("transaction identifier missing".into()));
        }
        let mut matches = transactions
            .iter()
            .filter(|txn| txn.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn.id),
            (Some(_), Some(_)) => Err(ServiceError::Invalid(format!(
                "identifier `{}` is ambiguous",
                reference
            ))),
            (None, _) => Err(ServiceError::NotFound(reference.to_string())),
        }
    }
}
