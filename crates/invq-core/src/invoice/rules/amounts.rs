//! Amount extraction and formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::FieldExtractor;
use super::patterns::AMOUNT;

/// Total amount extractor.
///
/// The total is the first monetary amount in the document; the supported
/// layout has exactly one.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = AMOUNT.captures(text)?;
        parse_amount(&caps[1])
    }
}

/// Parse an amount such as "3,100.00", dropping thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Format an amount with comma thousands separators and two decimals
/// (1234.5 -> "1,234.50").
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::with_capacity(s.len() + chars.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}.{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("3,100.00"), Some(dec("3100.00")));
        assert_eq!(parse_amount("1,234,567.89"), Some(dec("1234567.89")));
        assert_eq!(parse_amount("12.50"), Some(dec("12.50")));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("3100")), "3,100.00");
        assert_eq!(format_amount(dec("1234567.891")), "1,234,567.89");
        assert_eq!(format_amount(dec("999.995")), "1,000.00");
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("12.5")), "12.50");
        assert_eq!(format_amount(dec("-2450")), "-2,450.00");
    }

    #[test]
    fn test_extract_total() {
        let text = "Invoice Number: INV-0012\nTotal Amount Due: $2,450.00\n";
        assert_eq!(AmountExtractor::new().extract(text), Some(dec("2450.00")));
    }

    #[test]
    fn test_extract_first_amount_wins() {
        let extractor = AmountExtractor::new();
        let text = "Subtotal: $1,000.00\nTax: $80.00\nTotal: $1,080.00";

        assert_eq!(extractor.extract(text), Some(dec("1000.00")));
    }

    #[test]
    fn test_extract_requires_two_decimals() {
        assert_eq!(AmountExtractor::new().extract("Total: $2450"), None);
    }
}
