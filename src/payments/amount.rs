//! Locale-independent amount rendering

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimal places (half-even) and drop trailing zeros.
///
/// `10` → `"10"`, `10.5` → `"10.5"`, `10.555` → `"10.56"`. No grouping
/// separators regardless of host locale.
pub fn format_amount(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .normalize()
        .to_string()
}

/// The amount exactly as written, scale included (`10.50` stays `10.50`).
pub fn natural_amount(amount: Decimal) -> String {
    amount.to_string()
}
