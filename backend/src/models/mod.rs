//! Domain models for the settlement core

pub mod player;
pub mod position;
pub mod pricing;
pub mod transaction;

// Re-exports
pub use player::{FinalHolding, Player, INITIAL_BUY_INS};
pub use position::{NetBalance, NetPosition, PlayerPosition};
pub use pricing::{PricingContext, DEFAULT_BUY_IN_AMOUNT, DEFAULT_STARTING_STACK};
pub use transaction::Transaction;
