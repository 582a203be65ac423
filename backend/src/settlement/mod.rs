//! Settlement Engine
//!
//! Turns a snapshot of net positions into the payments that zero everyone
//! out. The engine is a single pass with no internal state: it copies its
//! input, matches creditors against debtors largest-first, and returns.
//!
//! # Critical Invariants
//!
//! 1. **Snapshot input**: positions are read, never adjusted in place
//! 2. **Tolerance**: balances within 0.01 are settled and excluded
//! 3. **Conservation**: on zero-sum input, Σ paid equals Σ credit
//!
//! # Example
//!
//! ```rust
//! use poker_settle_core::NetPosition;
//! use poker_settle_core::settlement;
//!
//! let positions = vec![
//!     NetPosition::new("A", 50.0),
//!     NetPosition::new("B", 20.0),
//!     NetPosition::new("C", -70.0),
//! ];
//!
//! let result = settlement::calculate_settlement(&positions);
//! assert_eq!(result.transactions.len(), 2);
//! assert_eq!(result.total_paid(), 70.0);
//! ```

pub mod greedy;

// Re-export public API
pub use greedy::{calculate_settlement, Settlement};
