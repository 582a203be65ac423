//! Checkpoint - Save/Load Session State
//!
//! Persists a session to a JSON file so a game night survives restarts.
//!
//! # Critical Invariants
//!
//! - **Integrity**: a SHA-256 checksum over the canonical payload is stored
//!   and re-verified on load; edited or truncated files are rejected
//! - **Valid Players**: names non-empty and unique (case-insensitive),
//!   seat count within the configured limit
//! - **Missing is not an error**: loading or clearing an absent file is a no-op

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::player::Player;
use crate::session::config::SessionConfig;
use crate::session::state::{Session, Stage};

/// Errors that can occur while saving or loading a session
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Session contents covered by the checksum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub session_id: Uuid,
    pub config: SessionConfig,
    pub stage: Stage,
    pub players: Vec<Player>,
}

/// On-disk session snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,

    /// SHA-256 of the canonical JSON of `payload`
    pub checksum: String,

    pub payload: SessionPayload,
}

impl From<&Session> for SessionPayload {
    fn from(session: &Session) -> Self {
        SessionPayload {
            session_id: session.id(),
            config: session.config().clone(),
            stage: session.stage(),
            players: session.players().to_vec(),
        }
    }
}

impl From<SessionPayload> for Session {
    fn from(payload: SessionPayload) -> Self {
        Session::from_parts(
            payload.session_id,
            payload.config,
            payload.stage,
            payload.players,
        )
    }
}

impl SessionSnapshot {
    /// Capture a session, stamping it with the current time
    pub fn capture(session: &Session) -> Result<Self, StorageError> {
        let payload = SessionPayload::from(session);
        let checksum = compute_checksum(&payload)?;
        Ok(SessionSnapshot {
            saved_at: Utc::now(),
            checksum,
            payload,
        })
    }

    /// Verify the checksum and player invariants, then rebuild the session
    pub fn restore(self) -> Result<Session, StorageError> {
        let computed = compute_checksum(&self.payload)?;
        if computed != self.checksum {
            return Err(StorageError::ChecksumMismatch {
                stored: self.checksum,
                computed,
            });
        }
        validate_payload(&self.payload)?;
        Ok(Session::from(self.payload))
    }
}

// ============================================================================
// Checksum
// ============================================================================

/// Compute a deterministic SHA-256 checksum of any serializable value
///
/// Object keys are sorted before hashing so the result does not depend on
/// field or map ordering.
pub fn compute_checksum<T: Serialize>(value: &T) -> Result<String, StorageError> {
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(serde_json::to_value(value)?);
    let json = serde_json::to_string(&canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Check the player invariants of a stored payload
pub fn validate_payload(payload: &SessionPayload) -> Result<(), StorageError> {
    if payload.players.len() > payload.config.max_players {
        return Err(StorageError::InvalidSnapshot(format!(
            "{} players exceed the limit of {}",
            payload.players.len(),
            payload.config.max_players
        )));
    }

    let mut seen = BTreeMap::new();
    for (index, player) in payload.players.iter().enumerate() {
        let name = player.name().trim();
        if name.is_empty() {
            return Err(StorageError::InvalidSnapshot(format!(
                "player {} has an empty name",
                index
            )));
        }
        if let Some(previous) = seen.insert(name.to_lowercase(), index) {
            return Err(StorageError::InvalidSnapshot(format!(
                "duplicate name '{}' at players {} and {}",
                name, previous, index
            )));
        }
    }

    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Write the session to `path`, replacing any previous snapshot
pub fn save_session(session: &Session, path: &Path) -> Result<SessionSnapshot, StorageError> {
    let snapshot = SessionSnapshot::capture(session)?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json).map_err(|source| io_error(path, source))?;
    info!(session = %session.id(), path = %path.display(), "session saved");
    Ok(snapshot)
}

/// Read the session stored at `path`, `Ok(None)` when there is none
pub fn load_session(path: &Path) -> Result<Option<Session>, StorageError> {
    let Some(snapshot) = read_snapshot(path)? else {
        return Ok(None);
    };
    let session = snapshot.restore()?;
    info!(session = %session.id(), path = %path.display(), "session loaded");
    Ok(Some(session))
}

/// Delete the stored session; a missing file is not an error
pub fn clear_session(path: &Path) -> Result<(), StorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "session cleared");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}

pub fn has_session(path: &Path) -> bool {
    path.is_file()
}

/// When the stored session was last saved
pub fn session_timestamp(path: &Path) -> Result<Option<DateTime<Utc>>, StorageError> {
    Ok(read_snapshot(path)?.map(|snapshot| snapshot.saved_at))
}

fn read_snapshot(path: &Path) -> Result<Option<SessionSnapshot>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
