//! Entry form state shared by the `add` wizard and the scripted `add` command.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::{Context, NewTransaction, PaymentMethod, TransactionType};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a submission is refused. The store is never touched on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormRejection {
    #[error("amount is required")]
    MissingAmount,
    #[error("date is required")]
    MissingDate,
    #[error("category is required for expenses")]
    MissingCategory,
    #[error("amount `{0}` is not a non-negative number")]
    InvalidAmount(String),
    #[error("date `{0}` is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
}

/// Raw field values of the entry form.
///
/// Fields hold text as typed; validation happens on [`TransactionForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub context: Context,
    pub kind: TransactionType,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
}

impl TransactionForm {
    pub fn new(context: Context, today: NaiveDate) -> Self {
        Self {
            context,
            kind: TransactionType::Expense,
            date: today.format(DATE_FORMAT).to_string(),
            amount: String::new(),
            category: String::new(),
            payment_method: PaymentMethod::Cash,
            description: String::new(),
        }
    }

    /// Switches the context, dropping a category that the new context does not offer.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
        if context.resolve_category(&self.category).is_none() {
            self.category.clear();
        }
    }

    /// Validates the fields and produces a candidate entry.
    ///
    /// On success the amount and description are cleared; the category is
    /// cleared only after an expense. Date, type and payment method persist.
    pub fn submit(&mut self) -> Result<NewTransaction, FormRejection> {
        let candidate = self.validate()?;
        self.amount.clear();
        self.description.clear();
        if self.kind == TransactionType::Expense {
            self.category.clear();
        }
        Ok(candidate)
    }

    fn validate(&self) -> Result<NewTransaction, FormRejection> {
        let amount_text = self.amount.trim();
        if amount_text.is_empty() {
            return Err(FormRejection::MissingAmount);
        }
        let date_text = self.date.trim();
        if date_text.is_empty() {
            return Err(FormRejection::MissingDate);
        }
        let category = self.category.trim();
        if self.kind == TransactionType::Expense && category.is_empty() {
            return Err(FormRejection::MissingCategory);
        }

        let amount = amount_text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or_else(|| FormRejection::InvalidAmount(amount_text.to_string()))?;
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| FormRejection::InvalidDate(date_text.to_string()))?;

        let candidate = match self.kind {
            TransactionType::Income => {
                NewTransaction::income(self.context, date, amount, self.payment_method)
            }
            TransactionType::Expense => {
                NewTransaction::expense(self.context, date, amount, category)
            }
        };
        Ok(candidate.with_description(self.description.trim()))
    }
}
