use serde::{Deserialize, Serialize};

/// Display symbol for Indian Rupees.
pub const RUPEE_SYMBOL: &str = "₹";

/// ASCII stand-in for the rupee sign, for renderers limited to WinAnsi fonts.
pub const RUPEE_ASCII: &str = "Rs.";

const MAX_FRACTION_DIGITS: usize = 3;

/// How integer digits are grouped when rendering amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// `12,34,567`: thousands, then groups of two (en-IN).
    #[default]
    Indian,
    /// `1,234,567`: groups of three.
    Western,
}

/// Currency presentation preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: RUPEE_SYMBOL.into(),
            grouping: DigitGrouping::Indian,
        }
    }
}

impl CurrencyFormat {
    /// Same grouping with the ASCII rupee label, for PDF output.
    pub fn ascii(&self) -> Self {
        let symbol = if self.symbol == RUPEE_SYMBOL {
            RUPEE_ASCII.to_string()
        } else {
            self.symbol.clone()
        };
        Self {
            symbol,
            grouping: self.grouping,
        }
    }

    /// Renders `amount` with the symbol, e.g. `₹1,00,000` or `-₹250.5`.
    pub fn format(&self, amount: f64) -> String {
        let body = format_number(amount.abs(), self.grouping);
        if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{}{}", self.symbol, body)
        } else {
            format!("{}{}", self.symbol, body)
        }
    }

    /// Renders with an explicit direction sign, as used in transaction listings.
    pub fn format_signed(&self, amount: f64, is_income: bool) -> String {
        let sign = if is_income { '+' } else { '-' };
        format!("{} {}", sign, self.format(amount.abs()))
    }
}

/// Formats a number with up to three fraction digits, dropping trailing zeros.
pub fn format_number(value: f64, grouping: DigitGrouping) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };
    let mut body = match grouping {
        DigitGrouping::Indian => group_indian(int_part),
        DigitGrouping::Western => group_western(int_part),
    };
    if !frac_part.is_empty() {
        body.push('.');
        body.push_str(frac_part);
    }
    if negative && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        body.insert(0, '-');
    }
    body
}

fn group_western(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    for (count, ch) in head.chars().rev().enumerate() {
        if count != 0 && count % 2 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    format!("{},{}", grouped, tail)
}
