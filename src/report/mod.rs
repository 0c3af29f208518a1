//! Per-context expense reports.
//!
//! [`ReportExporter`] turns the transactions of one context into a
//! [`ReportDocument`] and hands it to a [`ReportRenderer`] that produces the
//! artifact bytes. Renderers without table support receive a notice-only
//! document instead of failing.

pub mod csv_export;
pub mod pdf;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    core::{
        services::{SummaryService, SummaryStats, TransactionService},
        utils::ensure_dir,
    },
    currency::CurrencyFormat,
    ledger::{Context, Transaction},
};

pub use csv_export::CsvRenderer;
pub use pdf::PdfRenderer;

/// Column headers of the transaction table.
pub const COLUMNS: [&str; 6] = ["Date", "Item Name", "Type", "Category", "Payment", "Amount"];

/// Body used when the renderer cannot lay out tables.
pub const TABLE_FALLBACK_NOTICE: &str = "Transaction details are available in the CSV export.";

const MISSING_CELL: &str = "-";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("Render error: {0}")]
    Render(String),
}

/// One table line, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub item: String,
    pub kind: String,
    pub category: String,
    pub payment: String,
    pub amount: String,
}

impl ReportRow {
    fn from_transaction(txn: &Transaction, currency: &CurrencyFormat) -> Self {
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            item: txn
                .description
                .clone()
                .unwrap_or_else(|| MISSING_CELL.to_string()),
            kind: txn.transaction_type().as_str().to_uppercase(),
            category: txn.category().to_string(),
            payment: txn
                .payment_method()
                .map(|method| method.label().to_string())
                .unwrap_or_else(|| MISSING_CELL.to_string()),
            amount: currency.format(txn.amount),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.date,
            &self.item,
            &self.kind,
            &self.category,
            &self.payment,
            &self.amount,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    Table(Vec<ReportRow>),
    Notice(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

/// Renderer-independent content of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub context: Context,
    pub title: String,
    pub generated_on: NaiveDate,
    pub stats: SummaryStats,
    pub summary: Vec<SummaryField>,
    pub body: ReportBody,
}

impl ReportDocument {
    pub fn generated_line(&self) -> String {
        format!("Generated on: {}", self.generated_on.format("%d/%m/%Y"))
    }
}

/// Output contract for report formats.
pub trait ReportRenderer {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Whether the transaction table can be laid out.
    fn supports_tables(&self) -> bool {
        true
    }

    /// Whether amounts must avoid non-ASCII currency symbols.
    fn ascii_only(&self) -> bool {
        false
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

/// `<Context>_Expenses_Report.<ext>`
pub fn report_file_name(context: Context, extension: &str) -> String {
    format!("{}_Expenses_Report.{}", context.label(), extension)
}

/// Builds report documents and writes rendered artifacts to disk.
#[derive(Debug, Clone, Default)]
pub struct ReportExporter {
    currency: CurrencyFormat,
}

impl ReportExporter {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    /// Assembles the document for `context` from the full transaction list.
    pub fn build_document(
        &self,
        transactions: &[Transaction],
        context: Context,
        generated_on: NaiveDate,
        renderer: &dyn ReportRenderer,
    ) -> ReportDocument {
        let currency = if renderer.ascii_only() {
            self.currency.ascii()
        } else {
            self.currency.clone()
        };
        let stats = SummaryService::totals(transactions, context);
        let summary = vec![
            SummaryField {
                label: "Total Income",
                value: currency.format(stats.total_income),
            },
            SummaryField {
                label: "Total Expense",
                value: currency.format(stats.total_expense),
            },
            SummaryField {
                label: "Balance",
                value: currency.format(stats.balance),
            },
        ];
        let body = if renderer.supports_tables() {
            ReportBody::Table(
                TransactionService::for_context(transactions, context)
                    .into_iter()
                    .map(|txn| ReportRow::from_transaction(txn, &currency))
                    .collect(),
            )
        } else {
            ReportBody::Notice(TABLE_FALLBACK_NOTICE)
        };

        ReportDocument {
            context,
            title: format!("RupeeWise - {} Expenses", context.label()),
            generated_on,
            stats,
            summary,
            body,
        }
    }

    /// Renders the report for `context` and writes it into `dir`.
    ///
    /// Returns the path of the written artifact.
    pub fn export(
        &self,
        renderer: &dyn ReportRenderer,
        transactions: &[Transaction],
        context: Context,
        generated_on: NaiveDate,
        dir: &Path,
    ) -> Result<PathBuf, ReportError> {
        let document = self.build_document(transactions, context, generated_on, renderer);
        if let ReportBody::Notice(_) = document.body {
            tracing::warn!(
                format = renderer.extension(),
                "table layout unavailable, writing notice-only report"
            );
        }
        let bytes = renderer.render(&document)?;
        ensure_dir(dir)?;
        let path = dir.join(report_file_name(context, renderer.extension()));
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "report exported");
        Ok(path)
    }
}
