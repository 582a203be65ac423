//! Poker Settle Core
//!
//! Settles a cash-game poker night: turns buy-ins and final chip counts
//! into net positions, then into the short list of payments that zeroes
//! everyone out.
//!
//! # Architecture
//!
//! - **core**: Money tolerance, rounding and formatting
//! - **models**: Domain types (Player, PricingContext, PlayerPosition, Transaction)
//! - **positions**: Position Calculator (buy-ins + holdings → net positions)
//! - **settlement**: Settlement Engine (net positions → payments)
//! - **session**: Mutable session state, configuration and persistence
//! - **export**: Share-text rendering
//!
//! # Critical Invariants
//!
//! 1. Balances within 0.01 currency units are settled
//! 2. Position and settlement computations are pure over borrowed snapshots
//! 3. Payments are rounded to cents only when emitted

// Module declarations
pub mod core;
pub mod export;
pub mod models;
pub mod positions;
pub mod session;
pub mod settlement;

// Re-exports for convenience
pub use crate::core::money::SETTLEMENT_EPSILON;
pub use models::{
    player::{FinalHolding, Player},
    position::{NetBalance, NetPosition, PlayerPosition},
    pricing::PricingContext,
    transaction::Transaction,
};
pub use positions::{chip_value, compute_net_positions, ChipReconciliation, PositionError};
pub use session::{
    ConfigError, Session, SessionConfig, SessionError, Stage, StorageError, Valuation,
};
pub use settlement::{calculate_settlement, Settlement};
