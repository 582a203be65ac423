//! Session state
//!
//! The single mutable source of truth for a game night. The session owns
//! the player list and walks through four stages:
//!
//! ```text
//! Setup ──start──► BuyIns ──begin_final_standing──► FinalStanding ──settle──► Settlement
//!   ▲                                                                            │
//!   └──────────────────────────────── reset ◄────────────────────────────────────┘
//! ```
//!
//! The position calculator and settlement engine never see the session
//! itself: each call hands them a borrowed snapshot of the players.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::export::{render_share_text, ShareContext};
use crate::models::player::{FinalHolding, Player, INITIAL_BUY_INS};
use crate::models::pricing::{DEFAULT_BUY_IN_AMOUNT, DEFAULT_STARTING_STACK};
use crate::models::position::PlayerPosition;
use crate::positions::{
    chip_value, compute_net_positions, reconcile_chips, validate_final_standings,
    ChipReconciliation, PositionError,
};
use crate::session::config::{SessionConfig, Valuation};
use crate::settlement::{calculate_settlement, Settlement};

/// Stage of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Setup,
    BuyIns,
    FinalStanding,
    Settlement,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Setup => "setup",
            Stage::BuyIns => "buy-ins",
            Stage::FinalStanding => "final standing",
            Stage::Settlement => "settlement",
        };
        write!(f, "{}", label)
    }
}

/// Errors that can occur during session operations
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name '{name}' is already in use")]
    DuplicateName { name: String },

    #[error("Maximum {max} players allowed")]
    TooManyPlayers { max: usize },

    #[error("No player named '{name}'")]
    UnknownPlayer { name: String },

    #[error("At least one player is required")]
    NoPlayers,

    #[error("Cannot {operation} during {stage}")]
    InvalidStage { operation: &'static str, stage: Stage },

    #[error("Invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("This session records final holdings as {expected}")]
    HoldingMismatch { expected: Valuation },

    #[error("Chip count does not match: {actual} counted, {expected} in play")]
    ChipCountMismatch { expected: u64, actual: u64 },

    #[error("Final cash does not match the pot: {actual} counted, {expected} in pot")]
    CashTotalMismatch { expected: f64, actual: f64 },

    #[error("Position error: {0}")]
    Position(#[from] PositionError),
}

/// A poker session
///
/// # Example
/// ```
/// use poker_settle_core::{FinalHolding, Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default());
/// session.add_player("Alice").unwrap();
/// session.add_player("Bob").unwrap();
/// session.start().unwrap();
/// session.begin_final_standing().unwrap();
/// session.record_final("Alice", FinalHolding::Chips(600)).unwrap();
/// session.record_final("Bob", FinalHolding::Chips(200)).unwrap();
///
/// let settlement = session.settle().unwrap();
/// assert_eq!(settlement.transactions[0].to_string(), "Bob pays Alice 100.00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    config: SessionConfig,
    stage: Stage,
    players: Vec<Player>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            stage: Stage::Setup,
            players: Vec::new(),
        }
    }

    /// Rebuild a session from stored parts (used when loading a snapshot)
    pub fn from_parts(id: Uuid, config: SessionConfig, stage: Stage, players: Vec<Player>) -> Self {
        Self {
            id,
            config,
            stage,
            players,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.has_name(name))
    }

    pub fn total_pot(&self) -> f64 {
        self.config.pricing().total_pot(&self.players)
    }

    pub fn total_chips(&self) -> u64 {
        self.config.pricing().total_chips(&self.players)
    }

    pub fn chip_value(&self) -> Result<f64, PositionError> {
        chip_value(&self.players, &self.config.pricing())
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Seat a new player with one buy-in
    ///
    /// Allowed during setup and buy-ins (late arrivals).
    pub fn add_player(&mut self, name: &str) -> Result<(), SessionError> {
        self.require_stage("add a player", &[Stage::Setup, Stage::BuyIns])?;

        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.players.len() >= self.config.max_players {
            return Err(SessionError::TooManyPlayers {
                max: self.config.max_players,
            });
        }
        if self.player(name).is_some() {
            return Err(SessionError::DuplicateName {
                name: name.to_string(),
            });
        }

        self.players.push(Player::new(name, INITIAL_BUY_INS));
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> Result<(), SessionError> {
        self.require_stage("remove a player", &[Stage::Setup])?;
        let index = self.index_of(name)?;
        self.players.remove(index);
        Ok(())
    }

    pub fn set_buy_in_amount(&mut self, amount: f64) -> Result<(), SessionError> {
        self.require_stage("change the buy-in amount", &[Stage::Setup, Stage::BuyIns])?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SessionError::InvalidAmount {
                field: "buy-in amount",
                value: amount,
            });
        }
        self.config.buy_in_amount = amount;
        Ok(())
    }

    pub fn set_starting_stack(&mut self, chips: u64) -> Result<(), SessionError> {
        self.require_stage("change the starting stack", &[Stage::Setup])?;
        if chips == 0 {
            return Err(SessionError::InvalidAmount {
                field: "starting stack",
                value: 0.0,
            });
        }
        self.config.starting_stack = chips;
        Ok(())
    }

    pub fn set_valuation(&mut self, valuation: Valuation) -> Result<(), SessionError> {
        self.require_stage("change how holdings are counted", &[Stage::Setup])?;
        self.config.valuation = valuation;
        Ok(())
    }

    /// Setup → BuyIns
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require_stage("start the game", &[Stage::Setup])?;
        if self.players.is_empty() {
            return Err(SessionError::NoPlayers);
        }
        self.stage = Stage::BuyIns;
        info!(session = %self.id, players = self.players.len(), "game started");
        Ok(())
    }

    // ========================================================================
    // Buy-ins
    // ========================================================================

    /// Record one more buy-in
    ///
    /// Late buy-ins are still accepted while final holdings are counted.
    pub fn add_buy_in(&mut self, name: &str) -> Result<u32, SessionError> {
        self.require_stage("add a buy-in", &[Stage::BuyIns, Stage::FinalStanding])?;
        let player = self.player_mut(name)?;
        player.add_buy_in();
        Ok(player.buy_ins())
    }

    /// Undo one buy-in; the count never drops below zero
    pub fn remove_buy_in(&mut self, name: &str) -> Result<u32, SessionError> {
        self.require_stage("remove a buy-in", &[Stage::BuyIns, Stage::FinalStanding])?;
        let player = self.player_mut(name)?;
        player.remove_buy_in();
        Ok(player.buy_ins())
    }

    /// BuyIns → FinalStanding
    ///
    /// A chip-counted session needs chips in play to price holdings.
    pub fn begin_final_standing(&mut self) -> Result<(), SessionError> {
        self.require_stage("begin the final standing", &[Stage::BuyIns])?;
        if self.config.valuation == Valuation::Chips {
            self.chip_value()?;
        }
        self.stage = Stage::FinalStanding;
        Ok(())
    }

    // ========================================================================
    // Final standing
    // ========================================================================

    pub fn record_final(&mut self, name: &str, holding: FinalHolding) -> Result<(), SessionError> {
        self.require_stage("record a final holding", &[Stage::FinalStanding])?;

        match (self.config.valuation, holding) {
            (Valuation::Chips, FinalHolding::Chips(_)) => {}
            (Valuation::Cash, FinalHolding::Cash(cash)) => {
                if !cash.is_finite() || cash < 0.0 {
                    return Err(SessionError::InvalidAmount {
                        field: "final cash",
                        value: cash,
                    });
                }
            }
            (expected, _) => return Err(SessionError::HoldingMismatch { expected }),
        }

        self.player_mut(name)?.set_final_holding(holding);
        Ok(())
    }

    /// Net positions for the current snapshot
    pub fn positions(&self) -> Result<Vec<PlayerPosition>, SessionError> {
        Ok(compute_net_positions(&self.players, &self.config.pricing())?)
    }

    pub fn reconcile(&self) -> ChipReconciliation {
        reconcile_chips(&self.players, &self.config.pricing())
    }

    /// FinalStanding → Settlement, after checking the holdings add up
    ///
    /// Chip sessions need an exact chip count; cash sessions need the
    /// final cash to match the pot within one cent.
    pub fn settle(&mut self) -> Result<Settlement, SessionError> {
        self.require_stage("settle", &[Stage::FinalStanding])?;
        self.check_final_standing()?;
        self.finish_settlement()
    }

    /// FinalStanding → Settlement without checking totals
    ///
    /// Mismatched totals surface as a non-zero
    /// [`Settlement::imbalance`] instead of an error.
    pub fn force_settle(&mut self) -> Result<Settlement, SessionError> {
        self.require_stage("settle", &[Stage::FinalStanding])?;
        self.finish_settlement()
    }

    /// Recompute the settlement of a settled session
    pub fn settlement(&self) -> Result<Settlement, SessionError> {
        self.require_stage("show the settlement", &[Stage::Settlement])?;
        Ok(calculate_settlement(&self.positions()?))
    }

    /// Shareable summary of a settled session
    pub fn share_text(&self, date: NaiveDate) -> Result<String, SessionError> {
        let positions = self.positions()?;
        let settlement = self.settlement()?;

        Ok(render_share_text(&ShareContext {
            date,
            currency_symbol: &self.config.currency_symbol,
            pricing: self.config.pricing(),
            positions: &positions,
            transactions: &settlement.transactions,
        }))
    }

    /// Start over at setup, optionally keeping the player names
    ///
    /// Buy-in amount and starting stack return to their defaults; the
    /// currency symbol, valuation and seat limit carry over.
    pub fn reset(&mut self, retain_names: bool) {
        let players = if retain_names {
            self.players
                .iter()
                .map(|p| Player::new(p.name(), INITIAL_BUY_INS))
                .collect()
        } else {
            Vec::new()
        };

        self.id = Uuid::new_v4();
        self.stage = Stage::Setup;
        self.players = players;
        self.config.buy_in_amount = DEFAULT_BUY_IN_AMOUNT;
        self.config.starting_stack = DEFAULT_STARTING_STACK;
        info!(session = %self.id, retained = self.players.len(), "session reset");
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn finish_settlement(&mut self) -> Result<Settlement, SessionError> {
        let settlement = calculate_settlement(&self.positions()?);
        self.stage = Stage::Settlement;
        info!(
            session = %self.id,
            payments = settlement.transactions.len(),
            "session settled"
        );
        Ok(settlement)
    }

    fn check_final_standing(&self) -> Result<(), SessionError> {
        match self.config.valuation {
            Valuation::Chips => {
                let check = self.reconcile();
                if !check.is_balanced() {
                    return Err(SessionError::ChipCountMismatch {
                        expected: check.total_chips_in_play,
                        actual: check.total_final_chips,
                    });
                }
            }
            Valuation::Cash => {
                let positions = self.positions()?;
                let pot = self.total_pot();
                if !validate_final_standings(&positions, pot) {
                    return Err(SessionError::CashTotalMismatch {
                        expected: pot,
                        actual: positions.iter().map(|p| p.final_value).sum(),
                    });
                }
            }
        }
        Ok(())
    }

    fn require_stage(&self, operation: &'static str, allowed: &[Stage]) -> Result<(), SessionError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(SessionError::InvalidStage {
                operation,
                stage: self.stage,
            })
        }
    }

    fn index_of(&self, name: &str) -> Result<usize, SessionError> {
        self.players
            .iter()
            .position(|p| p.has_name(name))
            .ok_or_else(|| SessionError::UnknownPlayer {
                name: name.trim().to_string(),
            })
    }

    fn player_mut(&mut self, name: &str) -> Result<&mut Player, SessionError> {
        let index = self.index_of(name)?;
        Ok(&mut self.players[index])
    }
}
