use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Category label assigned to every income entry.
pub const INCOME_CATEGORY: &str = "Income";

const HOME_EXPENSE_CATEGORIES: &[&str] = &[
    "Rent/EMI",
    "Groceries",
    "Electricity",
    "Water",
    "Internet/Phone",
    "Maintenance",
    "Domestic Help",
    "Repairs",
    "Decor/Furniture",
    "Others",
];

const SCHOOL_EXPENSE_CATEGORIES: &[&str] = &[
    "Tuition Fees",
    "Books/Supplies",
    "Uniforms",
    "Transport/Bus",
    "Stationery",
    "Field Trips",
    "Lunch/Snacks",
    "Events/Annual Day",
    "Private Tutors",
    "Others",
];

/// One of the two independent ledgers every transaction belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Context {
    #[default]
    Home,
    School,
}

impl Context {
    pub const ALL: [Context; 2] = [Context::Home, Context::School];

    pub fn label(self) -> &'static str {
        match self {
            Context::Home => "Home",
            Context::School => "School",
        }
    }

    /// Enumerated expense categories offered for this context.
    pub fn expense_categories(self) -> &'static [&'static str] {
        match self {
            Context::Home => HOME_EXPENSE_CATEGORIES,
            Context::School => SCHOOL_EXPENSE_CATEGORIES,
        }
    }

    /// Case-insensitive lookup of an expense category, returning its canonical spelling.
    pub fn resolve_category(self, input: &str) -> Option<&'static str> {
        let needle = input.trim();
        self.expense_categories()
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Context {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Context::Home),
            "school" => Ok(Context::School),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown context `{}` (expected home or school)",
                other
            ))),
        }
    }
}

/// Source recorded for income entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Bank,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Bank, PaymentMethod::Other];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Bank => "Bank",
            PaymentMethod::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "bank" => Ok(PaymentMethod::Bank),
            "other" => Ok(PaymentMethod::Other),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown payment method `{}` (expected cash, bank or other)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_parse_case_insensitively() {
        assert_eq!("HOME".parse::<Context>().unwrap(), Context::Home);
        assert_eq!(" school ".parse::<Context>().unwrap(), Context::School);
        assert!("office".parse::<Context>().is_err());
    }

    #[test]
    fn category_lookup_is_scoped_to_context() {
        assert_eq!(
            Context::Home.resolve_category("groceries"),
            Some("Groceries")
        );
        assert_eq!(Context::School.resolve_category("groceries"), None);
        assert_eq!(
            Context::School.resolve_category("tuition fees"),
            Some("Tuition Fees")
        );
    }
}
