//! Derived values shared by every template.
//!
//! These are the computations that must come out identical in the preview
//! and the exported page: currency splits, per-line allocations, date
//! formatting, and freeform-block line parsing. Templates never reimplement
//! them locally.

use chrono::{Datelike, NaiveDate};

/// Fixed VAT rate applied to tax-inclusive totals.
pub const TAX_RATE: f64 = 0.20;

/// Placeholder shown wherever a date field is empty or unparseable.
pub const DATE_PLACEHOLDER: &str = "JJ/MM/AAAA";

/// A tax-inclusive total split into its base and tax parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxSplit {
    /// Amount before tax.
    pub base: f64,
    /// Tax part; `base + tax` reconstructs the input total.
    pub tax: f64,
}

/// Splits a tax-inclusive total at the fixed rate. Non-positive totals
/// split to zero, matching the blank-form rendering.
pub fn split_tax_inclusive(total: f64) -> TaxSplit {
    if total <= 0.0 {
        return TaxSplit { base: 0.0, tax: 0.0 };
    }
    let base = total / (1.0 + TAX_RATE);
    TaxSplit { base, tax: total - base }
}

/// Allocates a total evenly across `line_count` rows. A zero count falls
/// back to one line so the division can never blow up on an empty block.
pub fn per_line_amount(total: f64, line_count: usize) -> f64 {
    total / line_count.max(1) as f64
}

/// Splits a freeform block into its non-empty lines.
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.trim().is_empty()).collect()
}

/// Formats an amount as the templates print money: two decimals and the
/// euro sign.
pub fn format_eur(amount: f64) -> String {
    format!("{:.2} €", amount)
}

/// A parsed `description: price` order line. Lines without a price (or
/// with an unparseable one) cost zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub description: String,
    pub price: f64,
}

pub fn parse_order_item(line: &str) -> OrderItem {
    match line.split_once(':') {
        Some((desc, price)) => OrderItem {
            description: desc.trim().to_string(),
            price: price.trim().parse().unwrap_or(0.0),
        },
        None => OrderItem { description: line.trim().to_string(), price: 0.0 },
    }
}

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Formats an ISO `YYYY-MM-DD` date the way the templates do: zero-padded
/// day, French month name, year. Anything unparseable renders the
/// `JJ/MM/AAAA` placeholder instead of failing.
pub fn format_date_fr(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => format!(
            "{:02} {} {}",
            date.day(),
            FRENCH_MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => DATE_PLACEHOLDER.to_string(),
    }
}

/// Same as [`format_date_fr`] but with a caller-chosen fallback (delivery
/// dates show "Non spécifiée" rather than the generic placeholder).
pub fn format_date_fr_or(raw: &str, fallback: &str) -> String {
    if NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").is_err() {
        return fallback.to_string();
    }
    format_date_fr(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_split_round_trips() {
        let total = 1200.0;
        let split = split_tax_inclusive(total);
        assert!((split.base - 1000.0).abs() < 1e-9);
        assert!((split.base + split.tax - total).abs() < 1e-9);
    }

    #[test]
    fn test_tax_split_of_nothing() {
        assert_eq!(split_tax_inclusive(0.0), TaxSplit { base: 0.0, tax: 0.0 });
        assert_eq!(split_tax_inclusive(-5.0), TaxSplit { base: 0.0, tax: 0.0 });
    }

    #[test]
    fn test_per_line_allocation_sums_to_total() {
        let total = 1200.0;
        let n = 3;
        let each = per_line_amount(total, n);
        assert!((each * n as f64 - total).abs() < 1e-9);
    }

    #[test]
    fn test_per_line_allocation_zero_lines() {
        // Division guard: an empty block behaves as a single line.
        assert_eq!(per_line_amount(1200.0, 0), 1200.0);
    }

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(non_empty_lines("a\n\n  \nb"), vec!["a", "b"]);
        assert!(non_empty_lines("").is_empty());
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(600.0), "600.00 €");
        assert_eq!(format_eur(1234.567), "1234.57 €");
    }

    #[test]
    fn test_parse_order_item() {
        assert_eq!(
            parse_order_item("Chaises de bureau: 450"),
            OrderItem { description: "Chaises de bureau".into(), price: 450.0 }
        );
        assert_eq!(
            parse_order_item("Livraison express"),
            OrderItem { description: "Livraison express".into(), price: 0.0 }
        );
        assert_eq!(parse_order_item("Écran: pas cher").price, 0.0);
    }

    #[test]
    fn test_format_date_fr() {
        assert_eq!(format_date_fr("2024-03-05"), "05 mars 2024");
        assert_eq!(format_date_fr("2026-08-01"), "01 août 2026");
        assert_eq!(format_date_fr(""), DATE_PLACEHOLDER);
        assert_eq!(format_date_fr("pas une date"), DATE_PLACEHOLDER);
    }

    #[test]
    fn test_format_date_fr_or() {
        assert_eq!(format_date_fr_or("", "Non spécifiée"), "Non spécifiée");
        assert_eq!(format_date_fr_or("2024-01-02", "Non spécifiée"), "02 janvier 2024");
    }
}
