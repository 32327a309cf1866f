//! Money formatting helpers.
//!
//! Prices are plain `rust_decimal::Decimal` values in the store's single
//! currency; this module owns the display convention (dollar sign, exactly two
//! decimal places) so the cart, the checkout message, and the templates all
//! agree on it.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display, e.g. `$19.99`.
///
/// Always renders exactly two decimal places, rounding half-up.
#[must_use]
pub fn display(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_two_decimal_places() {
        assert_eq!(display(dec!(25.5)), "$25.50");
        assert_eq!(display(dec!(10)), "$10.00");
        assert_eq!(display(dec!(0)), "$0.00");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(display(dec!(1.005)), "$1.01");
        assert_eq!(display(dec!(2.999)), "$3.00");
    }
}
