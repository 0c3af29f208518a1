use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::{Context, PaymentMethod, INCOME_CATEGORY};
use crate::errors::LedgerError;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that only exist for one direction of entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Income {
        payment_method: Option<PaymentMethod>,
    },
    Expense {
        category: String,
    },
}

impl EntryKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            EntryKind::Income { .. } => TransactionType::Income,
            EntryKind::Expense { .. } => TransactionType::Expense,
        }
    }
}

/// A recorded income or expense entry.
///
/// Serializes to the flat JSON shape used by the persisted slot
/// (`id`, `date`, `amount`, `type`, `context`, `category`, `paymentMethod?`,
/// `description?`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction", into = "StoredTransaction")]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub context: Context,
    pub kind: EntryKind,
    pub description: Option<String>,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, EntryKind::Income { .. })
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, EntryKind::Expense { .. })
    }

    /// Category label; income entries always report the fixed income sentinel.
    pub fn category(&self) -> &str {
        match &self.kind {
            EntryKind::Income { .. } => INCOME_CATEGORY,
            EntryKind::Expense { category } => category,
        }
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self.kind {
            EntryKind::Income { payment_method } => payment_method,
            EntryKind::Expense { .. } => None,
        }
    }

    /// First eight hex digits of the identifier, used for display and lookups.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// Candidate entry produced by the form, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub context: Context,
    pub kind: EntryKind,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn income(
        context: Context,
        date: NaiveDate,
        amount: f64,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            date,
            amount,
            context,
            kind: EntryKind::Income {
                payment_method: Some(payment_method),
            },
            description: None,
        }
    }

    pub fn expense(
        context: Context,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            context,
            kind: EntryKind::Expense {
                category: category.into(),
            },
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn into_transaction(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            date: self.date,
            amount: self.amount,
            context: self.context,
            kind: self.kind,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTransaction {
    id: Uuid,
    date: NaiveDate,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionType,
    context: Context,
    #[serde(default)]
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = LedgerError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        if !stored.amount.is_finite() || stored.amount < 0.0 {
            return Err(LedgerError::InvalidInput(format!(
                "transaction {} has invalid amount {}",
                stored.id, stored.amount
            )));
        }
        let kind = match stored.kind {
            TransactionType::Income => EntryKind::Income {
                payment_method: stored.payment_method,
            },
            TransactionType::Expense => EntryKind::Expense {
                category: stored.category,
            },
        };
        Ok(Transaction {
            id: stored.id,
            date: stored.date,
            amount: stored.amount,
            context: stored.context,
            kind,
            description: stored.description.filter(|text| !text.is_empty()),
        })
    }
}

impl From<Transaction> for StoredTransaction {
    fn from(txn: Transaction) -> Self {
        let kind = txn.transaction_type();
        let (category, payment_method) = match txn.kind {
            EntryKind::Income { payment_method } => (INCOME_CATEGORY.to_string(), payment_method),
            EntryKind::Expense { category } => (category, None),
        };
        Self {
            id: txn.id,
            date: txn.date,
            amount: txn.amount,
            kind,
            context: txn.context,
            category,
            payment_method,
            description: txn.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn income_serializes_with_sentinel_category_and_method() {
        let txn = NewTransaction::income(Context::Home, date(2024, 3, 1), 1000.0, PaymentMethod::Bank)
            .into_transaction(Uuid::nil());
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], "Income");
        assert_eq!(value["paymentMethod"], "Bank");
        assert_eq!(value["date"], "2024-03-01");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn expense_omits_payment_method() {
        let txn = NewTransaction::expense(Context::School, date(2024, 3, 2), 250.0, "Uniforms")
            .with_description("Winter set")
            .into_transaction(Uuid::nil());
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["category"], "Uniforms");
        assert_eq!(value["description"], "Winter set");
        assert!(value.get("paymentMethod").is_none());
    }

    #[test]
    fn flat_record_loads_into_tagged_variant() {
        let raw = json!({
            "id": "2f1c7a52-08e4-4b7e-9a55-0c1e4b3f6d10",
            "date": "2024-05-10",
            "amount": 300,
            "type": "expense",
            "context": "Home",
            "category": "Groceries",
            "description": ""
        });
        let txn: Transaction = serde_json::from_value(raw).unwrap();
        assert_eq!(
            txn.kind,
            EntryKind::Expense {
                category: "Groceries".into()
            }
        );
        assert_eq!(txn.description, None);
        assert_eq!(txn.payment_method(), None);
    }

    #[test]
    fn negative_amount_is_rejected_on_load() {
        let raw = json!({
            "id": "2f1c7a52-08e4-4b7e-9a55-0c1e4b3f6d10",
            "date": "2024-05-10",
            "amount": -5,
            "type": "income",
            "context": "Home",
            "category": "Income"
        });
        assert!(serde_json::from_value::<Transaction>(raw).is_err());
    }

    #[test]
    fn short_id_is_eight_hex_digits() {
        let txn = NewTransaction::expense(Context::Home, date(2024, 1, 1), 1.0, "Water")
            .into_transaction(Uuid::new_v4());
        let short = txn.short_id();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
