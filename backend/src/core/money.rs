//! Money helpers shared by the position calculator and settlement engine
//!
//! Money is carried as `f64` currency units. Chip conversion produces
//! fractional amounts, so every comparison against zero goes through
//! [`SETTLEMENT_EPSILON`] instead of exact equality.
//!
//! # Critical Invariants
//!
//! 1. The epsilon is a currency-unit tolerance (one cent), not machine epsilon
//! 2. Rounding happens only at output boundaries (transactions, display)

/// Tolerance below which a balance is treated as settled (one cent)
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Round an amount to whole cents (half away from zero)
///
/// # Example
/// ```
/// use poker_settle_core::core::money::round_cents;
///
/// assert_eq!(round_cents(33.333), 33.33);
/// assert_eq!(round_cents(0.125), 0.13);
/// ```
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// True when `amount` is within one cent of zero
pub fn is_settled(amount: f64) -> bool {
    amount.abs() < SETTLEMENT_EPSILON
}

/// Format an amount for summaries: whole amounts drop the `.00`
///
/// # Example
/// ```
/// use poker_settle_core::core::money::format_money;
///
/// assert_eq!(format_money(200.0), "200");
/// assert_eq!(format_money(166.666), "166.67");
/// assert_eq!(format_money(12.5), "12.50");
/// ```
pub fn format_money(amount: f64) -> String {
    let rounded = round_cents(amount);
    if rounded.fract() == 0.0 {
        // `+ 0.0` folds -0.0 into 0.0
        format!("{}", rounded + 0.0)
    } else {
        format!("{:.2}", rounded)
    }
}

/// Format an amount with exactly two decimals
pub fn format_cents(amount: f64) -> String {
    format!("{:.2}", round_cents(amount))
}
