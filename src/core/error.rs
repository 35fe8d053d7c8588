//=========================================================================
// Error Taxonomy
//=========================================================================
//
// Failure channels of the game shell.
//
//   AssetLoadError     → fatal for required entries, degraded for optional
//   UnknownStateError  → programming error (fatal when raised mid-tick)
//   AudioPlaybackError → silence, never surfaced to the player
//   RuntimeError       → the fatal subset, returned from a tick
//
// No operation retries.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== UnknownStateError ===================================================

/// A transition named a state that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no state registered under `{name}`")]
pub struct UnknownStateError {
    /// The name that failed to resolve.
    pub name: String,
}

impl UnknownStateError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

//=== AssetLoadError ======================================================

/// Loading a single manifest entry failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetLoadError {
    /// Nothing exists at the declared location.
    #[error("asset `{key}` not found at {path}")]
    NotFound { key: String, path: String },

    /// The location exists but could not be read.
    #[error("failed to read asset `{key}` from {path}: {reason}")]
    Io {
        key: String,
        path: String,
        reason: String,
    },

    /// The asset was read but holds no data.
    #[error("asset `{key}` at {path} is empty")]
    Empty { key: String, path: String },
}

impl AssetLoadError {
    /// Key of the entry that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound { key, .. } | Self::Io { key, .. } | Self::Empty { key, .. } => key,
        }
    }
}

//=== AudioPlaybackError ==================================================

/// The host refused or failed to start playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioPlaybackError {
    /// Host policy (e.g. autoplay restrictions) blocked playback.
    #[error("playback of `{0}` blocked by host policy")]
    Blocked(String),

    /// No output device is available.
    #[error("audio output unavailable")]
    Unavailable,
}

//=== RuntimeError ========================================================

/// Fatal errors that stop the logic thread.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    UnknownState(#[from] UnknownStateError),

    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),
}

//=========================================================================
// Unit Tests
//=========================================================================
