use serde::Serialize;

use crate::ledger::{Context, EntryKind, Transaction};

/// Cyclic palette assigned to breakdown entries by position.
pub const CHART_COLORS: [&str; 10] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d", "#ffc658", "#8dd1e1",
    "#a4de6c", "#d0ed57",
];

/// Income, expense and balance totals for one context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

/// Summed expense amount for one category, with its display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Pure aggregation helpers over a transaction list.
pub struct SummaryService;

impl SummaryService {
    /// Totals for `context`. Records of the other context are ignored.
    pub fn totals(transactions: &[Transaction], context: Context) -> SummaryStats {
        Self::totals_of(transactions.iter().filter(|txn| txn.context == context))
    }

    /// Totals over an already filtered sequence.
    pub fn totals_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> SummaryStats {
        let (total_income, total_expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    EntryKind::Income { .. } => (income + txn.amount, expense),
                    EntryKind::Expense { .. } => (income, expense + txn.amount),
                });
        SummaryStats {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Expense totals per category for `context`, in first-encountered order.
    pub fn category_breakdown(transactions: &[Transaction], context: Context) -> Vec<CategorySlice> {
        let mut slices: Vec<CategorySlice> = Vec::new();
        for txn in transactions.iter().filter(|txn| txn.context == context) {
            let EntryKind::Expense { category } = &txn.kind else {
                continue;
            };
            match slices.iter_mut().find(|slice| &slice.name == category) {
                Some(slice) => slice.value += txn.amount,
                None => {
                    let color = CHART_COLORS[slices.len() % CHART_COLORS.len()];
                    slices.push(CategorySlice {
                        name: category.clone(),
                        value: txn.amount,
                        color,
                    });
                }
            }
        }
        slices
    }
}
