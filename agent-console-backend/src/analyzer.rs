//! Statement field extraction: pulls candidate dates and money amounts out of raw statement text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// d/m/y or m-d-y style dates with 2-4 digit years
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}").expect("valid date regex")
});

/// Optional dollar sign, thousands separators, optional cents
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?\s?\d{1,3}(?:,\d{3})*(?:\.\d{2})?").expect("valid amount regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatementFields {
    pub dates: Vec<String>,
    pub amounts: Vec<String>,
}

/// Extract the distinct dates and amounts, in the order they first appear
pub fn analyze_statement(text: &str) -> StatementFields {
    let dates = unique(DATE_PATTERN.find_iter(text).map(|m| m.as_str()));

    let amounts = unique(
        AMOUNT_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|a| a.chars().count() > 1 && a.chars().any(char::is_numeric)),
    );

    StatementFields { dates, amounts }
}

fn unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_dates_in_order_without_duplicates() {
        let fields = analyze_statement("Opened 01/15/2024, closed 2-3-24, reopened 01/15/2024");
        assert_eq!(fields.dates, vec!["01/15/2024", "2-3-24"]);
    }

    #[test]
    fn test_extracts_dollar_amounts() {
        let fields = analyze_statement("Balance: $1,234.56\nFee: $ 35.00");
        assert!(fields.amounts.contains(&"$1,234.56".to_string()));
        assert!(fields.amounts.contains(&"$ 35.00".to_string()));
    }

    #[test]
    fn test_single_characters_are_not_amounts() {
        let fields = analyze_statement("Ref:7");
        assert!(fields.amounts.is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_measured_in_characters() {
        // A lone multi-byte digit is still a single character
        assert!(analyze_statement("Ref:\u{0663}").amounts.is_empty());

        let fields = analyze_statement("Total:\u{0663}\u{0664}");
        assert_eq!(fields.amounts, vec!["\u{0663}\u{0664}"]);
    }

    #[test]
    fn test_repeated_amounts_keep_first_occurrence_order() {
        let text = "Deposit $50.00\nWithdrawal $20.00\nDeposit $50.00\nFee $20.00\nDeposit $75.00";
        let fields = analyze_statement(text);
        assert_eq!(fields.amounts, vec!["$50.00", "$20.00", "$75.00"]);
    }

    #[test]
    fn test_large_statement_deduplicates() {
        let text = (0..5_000)
            .map(|i| format!("{:02}/01/2024 ${}.00", i % 28 + 1, i % 100))
            .collect::<Vec<_>>()
            .join("\n");
        let fields = analyze_statement(&text);
        assert_eq!(fields.dates.len(), 28);
        assert_eq!(fields.dates[0], "01/01/2024");
        let dollars: Vec<&String> = fields.amounts.iter().filter(|a| a.starts_with('$')).collect();
        assert_eq!(dollars.len(), 100);
        assert_eq!(dollars[0], "$0.00");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze_statement(""), StatementFields::default());
    }
}
