//! # Shared Utility Functions
//!
//! Display formatting for prices and percentages, shared by every front end.
//!
//! ```rust
//! use shared::utils::{format_usd, format_percent};
//!
//! assert_eq!(format_usd(64250.5), "$64,250.50");
//! assert_eq!(format_percent(0.1234), "+12.34%");
//! ```

/// Format a USD amount with thousands separators and two decimals.
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Format a BTC amount with eight decimals.
pub fn format_btc(amount: f64) -> String {
    format!("{:.8} BTC", amount)
}

/// Format a fraction (0.12 = 12%) as a signed percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:+.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-42.1), "-$42.10");
    }

    #[test]
    fn test_format_btc() {
        assert_eq!(format_btc(1.5), "1.50000000 BTC");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "+50.00%");
        assert_eq!(format_percent(-0.0125), "-1.25%");
    }
}
