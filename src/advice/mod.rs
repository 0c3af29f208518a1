//! Free-text spending advice from a generative model.
//!
//! The [`AdviceRequester`] never fails: every outcome of the underlying
//! [`AdviceProvider`] is mapped to a displayable string.

pub mod gemini;

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::{Context, Transaction, TransactionType};

pub use gemini::GeminiProvider;

pub const MISSING_KEY_MESSAGE: &str =
    "API Key is missing. Please configure the environment to use AI features.";
pub const FAILURE_MESSAGE: &str =
    "Unable to generate insights at this moment. Please try again later.";
pub const EMPTY_REPLY_MESSAGE: &str = "No advice generated.";

/// Maximum number of transactions forwarded to the provider.
pub const SAMPLE_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// No credential is configured; nothing was sent.
    Unavailable,
    Success(String),
    Failure(String),
}

/// A backend able to answer a single advice prompt.
pub trait AdviceProvider {
    fn generate(&self, prompt: &str) -> AdviceOutcome;
}

impl<P: AdviceProvider + ?Sized> AdviceProvider for &P {
    fn generate(&self, prompt: &str) -> AdviceOutcome {
        (**self).generate(prompt)
    }
}

#[derive(Serialize)]
struct PromptRecord<'a> {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: &'a str,
    amount: f64,
    context: Context,
}

/// Builds the advice prompt from the first [`SAMPLE_LIMIT`] transactions.
pub fn build_prompt(
    transactions: &[&Transaction],
    context: Context,
) -> Result<String, serde_json::Error> {
    let records: Vec<PromptRecord<'_>> = transactions
        .iter()
        .take(SAMPLE_LIMIT)
        .map(|txn| PromptRecord {
            date: txn.date,
            kind: txn.transaction_type(),
            category: txn.category(),
            amount: txn.amount,
            context: txn.context,
        })
        .collect();
    let data = serde_json::to_string(&records)?;

    Ok(format!(
        "You are a helpful financial advisor for an Indian household.\n\
         Analyze the following expense data for the '{context}' context.\n\
         Data: {data}\n\
         \n\
         Please provide:\n\
         1. A brief summary of spending habits.\n\
         2. Three specific tips to save money based on these categories in Indian Rupees (₹).\n\
         3. Identify any unusual spending spikes.\n\
         \n\
         Keep the tone encouraging and practical. Limit response to 200 words.\n\
         Format the output in clean Markdown.",
        context = context.label(),
    ))
}

pub struct AdviceRequester<P> {
    provider: P,
}

impl<P: AdviceProvider> AdviceRequester<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Requests advice for `transactions`, already filtered to `context`
    /// and in listing order.
    pub fn request(&self, transactions: &[&Transaction], context: Context) -> String {
        let prompt = match build_prompt(transactions, context) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize advice data");
                return FAILURE_MESSAGE.to_string();
            }
        };
        tracing::debug!(
            context = %context,
            sampled = transactions.len().min(SAMPLE_LIMIT),
            "requesting advice"
        );

        match self.provider.generate(&prompt) {
            AdviceOutcome::Unavailable => MISSING_KEY_MESSAGE.to_string(),
            AdviceOutcome::Success(text) if text.trim().is_empty() => {
                EMPTY_REPLY_MESSAGE.to_string()
            }
            AdviceOutcome::Success(text) => text,
            AdviceOutcome::Failure(reason) => {
                tracing::error!(%reason, "advice request failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}
