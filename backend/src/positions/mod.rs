//! Position Calculator
//!
//! Turns buy-ins and final holdings into a signed net position per player.
//!
//! # Flow
//!
//! ```text
//! buy-ins ──► total_buy_in ─┐
//!                           ├─► net_position = final_value - total_buy_in
//! holding ──► final_value ──┘
//!               ▲
//!               └── chips × chip_value  (chip_value = total_pot / total_chips)
//! ```
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: when Σ final values equals the pot, Σ net positions is zero
//! 2. **Purity**: inputs are borrowed, never mutated
//! 3. **No NaN**: chip conversion refuses to run with zero chips in play
//!
//! # Example
//!
//! ```rust
//! use poker_settle_core::{FinalHolding, Player, PricingContext};
//! use poker_settle_core::positions::compute_net_positions;
//!
//! let pricing = PricingContext::new(200.0, 400);
//! let players = vec![
//!     Player::new("Alice", 1).with_final(FinalHolding::Chips(600)),
//!     Player::new("Bob", 1).with_final(FinalHolding::Chips(200)),
//! ];
//!
//! let positions = compute_net_positions(&players, &pricing).unwrap();
//! assert_eq!(positions[0].net_position, 100.0);
//! assert_eq!(positions[1].net_position, -100.0);
//! ```

pub mod calculator;
pub mod reconcile;

// Re-export public API
pub use calculator::{chip_value, compute_net_positions, net_position, PositionError};
pub use reconcile::{reconcile_chips, validate_final_standings, ChipReconciliation};
