//! Session configuration
//!
//! Table-level settings that stay fixed for a whole game: buy-in price,
//! chips per buy-in, how final holdings are counted, and the seat limit.
//! Loadable from a TOML file; every field has a default.
//!
//! ```toml
//! buy_in_amount = 200.0
//! starting_stack = 400
//! currency_symbol = "$"
//! valuation = "chips"
//! max_players = 9
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::pricing::{PricingContext, DEFAULT_BUY_IN_AMOUNT, DEFAULT_STARTING_STACK};

/// Hard ceiling on seats at one table
pub const MAX_PLAYERS: usize = 9;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How players report their final holdings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valuation {
    /// Players count chips; money follows from the chip value
    #[default]
    Chips,

    /// Players report money directly
    Cash,
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valuation::Chips => write!(f, "chips"),
            Valuation::Cash => write!(f, "cash"),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Money paid per buy-in
    pub buy_in_amount: f64,

    /// Chips received per buy-in
    pub starting_stack: u64,

    /// Symbol prefixed to money in summaries
    pub currency_symbol: String,

    /// How final holdings are recorded
    pub valuation: Valuation,

    /// Seat limit (1..=9)
    pub max_players: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buy_in_amount: DEFAULT_BUY_IN_AMOUNT,
            starting_stack: DEFAULT_STARTING_STACK,
            currency_symbol: "$".to_string(),
            valuation: Valuation::Chips,
            max_players: MAX_PLAYERS,
        }
    }
}

impl SessionConfig {
    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.buy_in_amount.is_finite() || self.buy_in_amount <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "buy_in_amount must be > 0, got {}",
                self.buy_in_amount
            )));
        }

        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid(
                "starting_stack must be > 0".to_string(),
            ));
        }

        if self.max_players == 0 || self.max_players > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "max_players must be between 1 and {}, got {}",
                MAX_PLAYERS, self.max_players
            )));
        }

        Ok(())
    }

    pub fn pricing(&self) -> PricingContext {
        PricingContext::new(self.buy_in_amount, self.starting_stack)
    }
}
