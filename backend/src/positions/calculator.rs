//! Net position computation

use thiserror::Error;

use crate::models::player::{FinalHolding, Player};
use crate::models::position::PlayerPosition;
use crate::models::pricing::PricingContext;

/// Errors that can occur while pricing positions
#[derive(Debug, Error, PartialEq)]
pub enum PositionError {
    #[error("Chip value is undefined with {total_chips} chips in play")]
    DivisionUndefined { total_chips: u64 },
}

/// Money per chip: total pot divided by total chips in play
///
/// # Errors
/// `DivisionUndefined` when no chips are in play (no buy-ins yet, or a
/// zero starting stack).
///
/// # Example
/// ```
/// use poker_settle_core::{Player, PricingContext};
/// use poker_settle_core::positions::chip_value;
///
/// let pricing = PricingContext::new(200.0, 400);
/// let players = vec![Player::new("A", 2), Player::new("B", 1), Player::new("C", 1)];
/// assert_eq!(chip_value(&players, &pricing).unwrap(), 0.5);
/// ```
pub fn chip_value(players: &[Player], pricing: &PricingContext) -> Result<f64, PositionError> {
    let total_chips = pricing.total_chips(players);
    if total_chips == 0 {
        return Err(PositionError::DivisionUndefined { total_chips });
    }

    // u64 -> f64 is exact for any realistic chip count
    Ok(pricing.total_pot(players) / total_chips as f64)
}

/// Signed net result for one player
pub fn net_position(final_value: f64, total_buy_in: f64) -> f64 {
    final_value - total_buy_in
}

/// Compute the net position of every player, in input order
///
/// The chip value is only required when at least one player recorded a
/// chip holding; an all-cash table prices fine with no chips in play.
/// A player with no recorded holding holds zero. No rounding is applied.
///
/// # Errors
/// `DivisionUndefined` when a chip holding must be converted and no chips
/// are in play.
pub fn compute_net_positions(
    players: &[Player],
    pricing: &PricingContext,
) -> Result<Vec<PlayerPosition>, PositionError> {
    let needs_chip_value = players
        .iter()
        .any(|p| matches!(p.final_holding(), Some(FinalHolding::Chips(_))));

    let chip_value = match chip_value(players, pricing) {
        Ok(value) => Some(value),
        Err(e) if needs_chip_value => return Err(e),
        Err(_) => None,
    };

    let positions = players
        .iter()
        .map(|player| price_player(player, pricing, chip_value))
        .collect();

    Ok(positions)
}

fn price_player(player: &Player, pricing: &PricingContext, chip_value: Option<f64>) -> PlayerPosition {
    let total_buy_in = pricing.total_buy_in(player.buy_ins());

    let (final_value, final_chips) = match player.final_holding() {
        Some(FinalHolding::Chips(chips)) => {
            // Only reachable with a chip value; see compute_net_positions
            let value = chip_value.map_or(0.0, |cv| chips as f64 * cv);
            (value, Some(chips))
        }
        Some(FinalHolding::Cash(cash)) => (cash, chip_value.map(|cv| derive_chips(cash, cv))),
        None => (0.0, Some(0)),
    };

    PlayerPosition {
        name: player.name().to_string(),
        buy_ins: player.buy_ins(),
        total_buy_in,
        starting_chips: pricing.starting_chips(player.buy_ins()),
        final_value,
        final_chips,
        net_position: net_position(final_value, total_buy_in),
    }
}

/// Whole chips equivalent to a cash amount
fn derive_chips(cash: f64, chip_value: f64) -> u64 {
    // Saturating cast: negative or NaN inputs map to 0
    (cash / chip_value).round() as u64
}
