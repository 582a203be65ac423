//! Transaction model
//!
//! One settlement instruction: a debtor pays a creditor.
//! Each transaction has:
//! - Payer name (`from`, a debtor)
//! - Payee name (`to`, a creditor)
//! - Amount, positive and rounded to cents
//!
//! Order within a settlement matters for display only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::money::{format_cents, round_cents};

/// A directed payment between two players
///
/// # Example
/// ```
/// use poker_settle_core::Transaction;
///
/// let tx = Transaction::new("Carol", "Alice", 19.999);
/// assert_eq!(tx.from(), "Carol");
/// assert_eq!(tx.to(), "Alice");
/// assert_eq!(tx.amount(), 20.0);
/// assert_eq!(tx.to_string(), "Carol pays Alice 20.00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Debtor paying
    from: String,

    /// Creditor receiving
    to: String,

    /// Amount paid, rounded to cents
    amount: f64,
}

impl Transaction {
    /// Create a transaction, rounding `amount` to cents
    ///
    /// # Panics
    /// Panics if the rounded amount is not positive
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        let amount = round_cents(amount);
        assert!(amount > 0.0, "amount must be positive");

        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Amount with exactly two decimals, e.g. `"100.00"`
    pub fn amount_display(&self) -> String {
        format_cents(self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount_display())
    }
}
