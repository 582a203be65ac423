//! Net position types
//!
//! A position is a derived view: it is recomputed from buy-ins and final
//! holdings every time those change and is never persisted on its own.
//!
//! Sign convention:
//! - positive net = creditor (is owed money)
//! - negative net = debtor (owes money)

use serde::{Deserialize, Serialize};

/// Anything the settlement engine can settle: a name and a signed net amount
pub trait NetBalance {
    fn name(&self) -> &str;
    fn net(&self) -> f64;
}

/// Full financial picture of one player after final holdings are known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub name: String,

    /// Buy-in units taken
    pub buy_ins: u32,

    /// Money contributed (`buy_ins × buy_in_amount`)
    pub total_buy_in: f64,

    /// Chips received over all buy-ins
    pub starting_chips: u64,

    /// Money value of the final holding
    pub final_value: f64,

    /// Final chip count, recorded or derived from the chip value
    ///
    /// `None` when no chips are in play and the holding was cash.
    pub final_chips: Option<u64>,

    /// `final_value - total_buy_in`, full precision
    pub net_position: f64,
}

impl NetBalance for PlayerPosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn net(&self) -> f64 {
        self.net_position
    }
}

/// A bare name/amount pair
///
/// Used as the engine's private working copy and to report residual
/// balances, and handy when net amounts come from somewhere other than
/// the position calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPosition {
    pub name: String,
    pub net: f64,
}

impl NetPosition {
    pub fn new(name: impl Into<String>, net: f64) -> Self {
        Self {
            name: name.into(),
            net,
        }
    }

    /// Snapshot any balance into an owned working copy
    pub fn from_balance<B: NetBalance + ?Sized>(balance: &B) -> Self {
        Self::new(balance.name(), balance.net())
    }
}

impl NetBalance for NetPosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn net(&self) -> f64 {
        self.net
    }
}

impl From<&PlayerPosition> for NetPosition {
    fn from(position: &PlayerPosition) -> Self {
        NetPosition::from_balance(position)
    }
}
