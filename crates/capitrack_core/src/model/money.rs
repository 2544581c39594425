//! Minor-unit money helpers.
//!
//! Amounts are stored as signed integer cents everywhere inside the core.
//! Euro (major-unit) values exist only at the presentation boundary.

/// Converts integer cents to a 2-decimal euro amount.
pub fn cents_to_euros(cents: i64) -> f64 {
    (cents as f64) / 100.0
}

/// Converts a euro amount to integer cents, rounding half away from zero.
pub fn euros_to_cents(euros: f64) -> i64 {
    (euros * 100.0).round() as i64
}

/// Renders cents as a plain `1234.50`-style euro string.
pub fn format_euros(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::{cents_to_euros, euros_to_cents, format_euros};

    #[test]
    fn cents_round_trip_through_euros() {
        assert_eq!(euros_to_cents(cents_to_euros(12_345)), 12_345);
        assert_eq!(euros_to_cents(cents_to_euros(-9_901)), -9_901);
    }

    #[test]
    fn euros_to_cents_rounds_half_away_from_zero() {
        assert_eq!(euros_to_cents(10.005), 1_001);
        assert_eq!(euros_to_cents(99.994), 9_999);
    }

    #[test]
    fn format_euros_keeps_sign_and_two_decimals() {
        assert_eq!(format_euros(120_000_00), "120000.00");
        assert_eq!(format_euros(-2_50), "-2.50");
        assert_eq!(format_euros(5), "0.05");
    }
}
