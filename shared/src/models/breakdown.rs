//! Price Breakdown Display Contract
//!
//! The ordered line items the UI renders for a landed-price quote, plus the
//! compact summary used on listing cards. Monetary values are formatted here
//! and nowhere else; the pricing core hands over full-precision decimals.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Sentinel label shown when a listing cannot be priced
pub const PRICE_UNAVAILABLE: &str = "Цена не указана";

/// One display line of a landed-price breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// Human-readable label (Russian, matches the storefront UI)
    pub label: String,
    /// Formatted display value
    pub value: String,
    /// Detail lines folded under this one (e.g. the customs group)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_lines: Vec<BreakdownLine>,
    /// Marks the terminating total line
    #[serde(default)]
    pub is_total: bool,
}

impl BreakdownLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub_lines: Vec::new(),
            is_total: false,
        }
    }

    pub fn with_sub_lines(mut self, sub_lines: Vec<BreakdownLine>) -> Self {
        self.sub_lines = sub_lines;
        self
    }

    pub fn total(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub_lines: Vec::new(),
            is_total: true,
        }
    }
}

/// Compact price for listing cards and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Landed total in whole rubles, `None` when the listing cannot be priced
    pub total_rub: Option<i64>,
    /// Short display form, e.g. `2.71 млн ₽`
    pub total_formatted: String,
}

impl PriceSummary {
    pub fn from_total(total_rub: Decimal) -> Self {
        Self {
            total_rub: round_whole(total_rub).to_i64(),
            total_formatted: format_millions(total_rub),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            total_rub: None,
            total_formatted: PRICE_UNAVAILABLE.to_string(),
        }
    }
}

/// Round to whole currency units, half away from zero
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `2 711 250 ₽` - whole rubles with ru-RU thousands grouping
pub fn format_rub(value: Decimal) -> String {
    format!("{} ₽", group_thousands(round_whole(value)))
}

/// `¥150 000` - whole yuan with thousands grouping
pub fn format_cny(value: Decimal) -> String {
    format!("¥{}", group_thousands(round_whole(value)))
}

/// `12 500 €` - whole euros with thousands grouping
pub fn format_eur(value: Decimal) -> String {
    format!("{} €", group_thousands(round_whole(value)))
}

/// `2.71 млн ₽` - millions with two decimals, for listing cards
pub fn format_millions(value: Decimal) -> String {
    let millions = value.to_f64().unwrap_or(0.0) / 1_000_000.0;
    format!("{millions:.2} млн ₽")
}

/// Group an integral decimal into thousands with non-breaking spaces
fn group_thousands(value: Decimal) -> String {
    let raw = value.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_rub(Decimal::from(2_711_250)), "2\u{a0}711\u{a0}250 ₽");
        assert_eq!(format_rub(Decimal::from(500)), "500 ₽");
        assert_eq!(format_cny(Decimal::from(150_000)), "¥150\u{a0}000");
        assert_eq!(format_eur(Decimal::from(5_400)), "5\u{a0}400 €");
    }

    #[test]
    fn test_rounding_happens_at_display() {
        // 100.5 rounds half away from zero
        assert_eq!(format_rub(Decimal::new(1005, 1)), "101 ₽");
        assert_eq!(format_rub(Decimal::new(1004, 1)), "100 ₽");
    }

    #[test]
    fn test_millions_short_form() {
        assert_eq!(format_millions(Decimal::from(2_711_250)), "2.71 млн ₽");
        assert_eq!(format_millions(Decimal::from(990_000)), "0.99 млн ₽");
    }

    #[test]
    fn test_summary_unavailable() {
        let summary = PriceSummary::unavailable();
        assert_eq!(summary.total_rub, None);
        assert_eq!(summary.total_formatted, PRICE_UNAVAILABLE);
    }

    #[test]
    fn test_summary_from_total() {
        let summary = PriceSummary::from_total(Decimal::new(2_711_250_4, 1));
        assert_eq!(summary.total_rub, Some(2_711_250));
    }

    #[test]
    fn test_sub_lines_skipped_when_empty() {
        let line = BreakdownLine::new("Цена автомобиля", "1 000 ₽");
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("sub_lines").is_none());
    }
}
