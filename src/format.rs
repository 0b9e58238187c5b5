//! Locale-aware currency formatting.
//!
//! The reference report formats amounts as Mexican-peso currency. The
//! formatter is a configuration input rather than a hardcoded locale, so
//! a report can ship with different separators or symbols.

use serde::{Deserialize, Serialize};

/// Currency display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyFormat {
    /// Symbol prefixed to the amount.
    pub symbol: String,
    /// Separator inserted between digit groups of three.
    pub thousands_sep: char,
    /// Decimal separator.
    pub decimal_sep: char,
    /// Number of decimal places.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    /// es-MX / MXN, matching the reference report.
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_sep: ',',
            decimal_sep: '.',
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    /// Format an amount, e.g. `1234.5` → `"$1,234.50"`.
    ///
    /// Rounding happens before grouping, so a carry across the decimal
    /// point is grouped correctly (`999.999` → `"$1,000.00"`).
    pub fn format_amount(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let fixed = format!("{:.*}", self.decimals as usize, amount.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (fixed.as_str(), ""),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_sep);
            }
            grouped.push(c);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&grouped);
        if !frac_part.is_empty() {
            out.push(self.decimal_sep);
            out.push_str(frac_part);
        }
        out
    }
}
