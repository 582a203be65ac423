//! Shared primitives: money tolerance, rounding and formatting

pub mod money;

pub use money::{format_cents, format_money, is_settled, round_cents, SETTLEMENT_EPSILON};
