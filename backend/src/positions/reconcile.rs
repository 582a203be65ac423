//! Final-standing checks
//!
//! Before settling, the table's final holdings must account for exactly
//! what was put in. Chip counts are compared exactly; cash totals are
//! compared within one cent.

use serde::{Deserialize, Serialize};

use crate::core::money::SETTLEMENT_EPSILON;
use crate::models::player::{FinalHolding, Player};
use crate::models::position::PlayerPosition;
use crate::models::pricing::PricingContext;

/// Comparison of counted chips against chips handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipReconciliation {
    /// Sum of recorded chip holdings
    pub total_final_chips: u64,

    /// Chips handed out over all buy-ins
    pub total_chips_in_play: u64,

    /// `total_final_chips - total_chips_in_play` (positive = too many)
    pub difference: i64,
}

impl ChipReconciliation {
    pub fn is_balanced(&self) -> bool {
        self.difference == 0
    }

    /// Chips over (`> 0`) or under (`< 0`) the amount in play
    pub fn describe(&self) -> String {
        match self.difference {
            0 => "chip count matches".to_string(),
            d if d > 0 => format!("{} chips too many", d),
            d => format!("{} chips too few", d.unsigned_abs()),
        }
    }
}

/// Compare recorded chip holdings with the chips in play
///
/// Only chip holdings are counted; unrecorded players count as zero and
/// cash holdings are ignored (use [`validate_final_standings`] for a cash
/// table).
///
/// # Example
/// ```
/// use poker_settle_core::{FinalHolding, Player, PricingContext};
/// use poker_settle_core::positions::reconcile_chips;
///
/// let pricing = PricingContext::new(200.0, 400);
/// let players = vec![
///     Player::new("A", 1).with_final(FinalHolding::Chips(500)),
///     Player::new("B", 1).with_final(FinalHolding::Chips(250)),
/// ];
///
/// let check = reconcile_chips(&players, &pricing);
/// assert_eq!(check.difference, -50);
/// assert!(!check.is_balanced());
/// ```
pub fn reconcile_chips(players: &[Player], pricing: &PricingContext) -> ChipReconciliation {
    let total_final_chips: u64 = players
        .iter()
        .map(|p| match p.final_holding() {
            Some(FinalHolding::Chips(chips)) => chips,
            _ => 0,
        })
        .sum();
    let total_chips_in_play = pricing.total_chips(players);

    ChipReconciliation {
        total_final_chips,
        total_chips_in_play,
        difference: total_final_chips as i64 - total_chips_in_play as i64,
    }
}

/// True when the final values add up to the pot within one cent
pub fn validate_final_standings(positions: &[PlayerPosition], total_pot: f64) -> bool {
    let total_final: f64 = positions.iter().map(|p| p.final_value).sum();
    (total_final - total_pot).abs() < SETTLEMENT_EPSILON
}
