//! Player model
//!
//! Represents one participant at the table.
//! Each player has:
//! - A display name (unique case-insensitively within a session)
//! - A count of buy-ins taken
//! - An optional final holding, recorded once the game ends
//!
//! Money amounts are derived from the buy-in count through a
//! [`PricingContext`](crate::models::PricingContext); the player itself
//! stores no currency values.

use serde::{Deserialize, Serialize};

/// Buy-ins a player holds when first seated
pub const INITIAL_BUY_INS: u32 = 1;

/// What a player holds when the game ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalHolding {
    /// Money held directly
    Cash(f64),

    /// Chips held, converted to money through the session chip value
    Chips(u64),
}

/// A seated player
///
/// # Example
/// ```
/// use poker_settle_core::{FinalHolding, Player};
///
/// let mut player = Player::new("Alice", 1);
/// player.add_buy_in();
/// player.set_final_holding(FinalHolding::Chips(1000));
///
/// assert_eq!(player.buy_ins(), 2);
/// assert_eq!(player.final_holding(), Some(FinalHolding::Chips(1000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name (trimmed, non-empty)
    name: String,

    /// Buy-in units taken
    buy_ins: u32,

    /// Holding at the end of the game, `None` until recorded
    #[serde(default)]
    final_holding: Option<FinalHolding>,
}

impl Player {
    /// Create a player with the given number of buy-ins and no final holding
    pub fn new(name: impl Into<String>, buy_ins: u32) -> Self {
        Self {
            name: name.into(),
            buy_ins,
            final_holding: None,
        }
    }

    /// Builder: attach a final holding
    pub fn with_final(mut self, holding: FinalHolding) -> Self {
        self.final_holding = Some(holding);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buy_ins(&self) -> u32 {
        self.buy_ins
    }

    pub fn final_holding(&self) -> Option<FinalHolding> {
        self.final_holding
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn add_buy_in(&mut self) {
        self.buy_ins = self.buy_ins.saturating_add(1);
    }

    /// Remove one buy-in; returns false when the count is already zero
    pub fn remove_buy_in(&mut self) -> bool {
        if self.buy_ins == 0 {
            return false;
        }
        self.buy_ins -= 1;
        true
    }

    pub fn set_final_holding(&mut self, holding: FinalHolding) {
        self.final_holding = Some(holding);
    }
}
