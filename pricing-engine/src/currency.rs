//! Display formatting for money amounts.
//!
//! Rounding to the currency's minor unit happens here and only here;
//! computation elsewhere stays unrounded so repeated conversions never
//! compound rounding error.

use billing_core::config::Config;
use rust_decimal::{Decimal, RoundingStrategy};

/// Digit grouping convention for the integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// Lakh/crore grouping used by en-IN: 1,23,45,678.
    Indian,
    /// 12,345,678.
    Western,
}

/// Locale and currency presentation settings.
#[derive(Debug, Clone)]
pub struct CurrencyStyle {
    pub code: String,
    pub symbol: String,
    pub grouping: DigitGrouping,
    pub decimal_places: u32,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "\u{20B9}".to_string(),
            grouping: DigitGrouping::Indian,
            decimal_places: 2,
        }
    }
}

impl CurrencyStyle {
    pub fn from_config(config: &Config) -> Self {
        let grouping = if config.locale.eq_ignore_ascii_case("en-IN") {
            DigitGrouping::Indian
        } else {
            DigitGrouping::Western
        };
        Self {
            code: config.currency_code.clone(),
            symbol: config.currency_symbol.clone(),
            grouping,
            decimal_places: 2,
        }
    }
}

/// Format an amount for display: round half-away-from-zero to the minor
/// unit, group the integer digits per locale, prefix the symbol, and put the
/// sign before the symbol.
pub fn format_currency(amount: Decimal, style: &CurrencyStyle) -> String {
    let rounded = amount.round_dp_with_strategy(
        style.decimal_places,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", style.decimal_places as usize, rounded.abs());

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + style.symbol.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&style.symbol);
    out.push_str(&group_digits(int_part, style.grouping));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut group_size = 3;
    while end > 0 {
        let start = end.saturating_sub(group_size);
        groups.push(chars[start..end].iter().collect());
        end = start;
        if grouping == DigitGrouping::Indian {
            group_size = 2;
        }
    }
    groups.reverse();
    groups.join(",")
}
