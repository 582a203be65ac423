//! Pricing context: how buy-ins translate into money and chips

use serde::{Deserialize, Serialize};

use crate::models::player::Player;

/// Default money paid per buy-in
pub const DEFAULT_BUY_IN_AMOUNT: f64 = 200.0;

/// Default chips handed out per buy-in
pub const DEFAULT_STARTING_STACK: u64 = 400;

/// Exchange terms for one session
///
/// # Example
/// ```
/// use poker_settle_core::PricingContext;
///
/// let pricing = PricingContext::new(200.0, 400);
/// assert_eq!(pricing.total_buy_in(2), 400.0);
/// assert_eq!(pricing.starting_chips(2), 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    /// Money paid for one buy-in
    pub buy_in_amount: f64,

    /// Chips received for one buy-in
    pub starting_stack: u64,
}

impl PricingContext {
    pub fn new(buy_in_amount: f64, starting_stack: u64) -> Self {
        Self {
            buy_in_amount,
            starting_stack,
        }
    }

    /// Money contributed for `buy_ins` units
    pub fn total_buy_in(&self, buy_ins: u32) -> f64 {
        f64::from(buy_ins) * self.buy_in_amount
    }

    /// Chips received for `buy_ins` units
    pub fn starting_chips(&self, buy_ins: u32) -> u64 {
        u64::from(buy_ins) * self.starting_stack
    }

    /// Total money put in by all players
    pub fn total_pot(&self, players: &[Player]) -> f64 {
        players.iter().map(|p| self.total_buy_in(p.buy_ins())).sum()
    }

    /// Total chips in play across all players
    pub fn total_chips(&self, players: &[Player]) -> u64 {
        players.iter().map(|p| self.starting_chips(p.buy_ins())).sum()
    }
}

impl Default for PricingContext {
    fn default() -> Self {
        Self {
            buy_in_amount: DEFAULT_BUY_IN_AMOUNT,
            starting_stack: DEFAULT_STARTING_STACK,
        }
    }
}
