//! Session - the application state around the settlement core
//!
//! Owns the mutable player list, stage progression, configuration and
//! on-disk persistence. The core computations receive borrowed snapshots.

pub mod checkpoint;
pub mod config;
pub mod state;

// Re-export main types for convenience
pub use checkpoint::{
    clear_session, compute_checksum, has_session, load_session, save_session, session_timestamp,
    SessionPayload, SessionSnapshot, StorageError,
};
pub use config::{ConfigError, SessionConfig, Valuation, MAX_PLAYERS};
pub use state::{Session, SessionError, Stage};
