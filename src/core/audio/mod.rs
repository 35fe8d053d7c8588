//=========================================================================
// Audio
//=========================================================================
//
// Playback contract with the host. Mixing and decoding belong to the
// backend; the shell only starts, stops and queries handles.
//
//=========================================================================

//=== Module Declarations =================================================

mod headless;

//=== Public API ==========================================================

pub use headless::HeadlessAudio;

use crate::core::error::AudioPlaybackError;

//=== AudioHandle =========================================================

/// Opaque reference to one playing sound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle {
    id: u64,
    key: String,
}

impl AudioHandle {
    pub fn new(id: u64, key: impl Into<String>) -> Self {
        Self { id, key: key.into() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Asset key the handle was started from.
    pub fn key(&self) -> &str {
        &self.key
    }
}

//=== AudioBackend ========================================================

/// Host audio output.
pub trait AudioBackend: Send {
    /// Starts playing the audio asset `key`.
    fn play(&mut self, key: &str, looped: bool) -> Result<AudioHandle, AudioPlaybackError>;

    /// Stops a handle. Stopping a finished or unknown handle is a no-op.
    fn stop(&mut self, handle: &AudioHandle);

    fn is_playing(&self, handle: &AudioHandle) -> bool;
}
