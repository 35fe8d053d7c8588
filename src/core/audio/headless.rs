//=========================================================================
// Headless Audio
//=========================================================================
//
// Backend that keeps playback bookkeeping without producing sound.
//
// Clones share state, so a host (or a test) can keep a clone to observe
// what the game believes is playing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{AudioBackend, AudioHandle};
use crate::core::error::AudioPlaybackError;

//=== HeadlessAudio =======================================================

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    playing: HashMap<u64, (String, bool)>,
    started: Vec<String>,
    blocked: bool,
}

/// Silent [`AudioBackend`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessAudio {
    inner: Arc<Mutex<Inner>>,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose host refuses playback, like a page that has not yet
    /// received a user gesture.
    pub fn blocked() -> Self {
        let audio = Self::default();
        audio.set_blocked(true);
        audio
    }

    pub fn set_blocked(&self, blocked: bool) {
        self.lock().blocked = blocked;
    }

    /// Keys currently playing, in start order.
    pub fn playing_keys(&self) -> Vec<String> {
        let inner = self.lock();
        let mut playing: Vec<_> = inner.playing.iter().collect();
        playing.sort_by_key(|(id, _)| **id);
        playing.into_iter().map(|(_, (key, _))| key.clone()).collect()
    }

    pub fn playing_count(&self) -> usize {
        self.lock().playing.len()
    }

    /// Every key ever started, in order.
    pub fn history(&self) -> Vec<String> {
        self.lock().started.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Bookkeeping stays consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AudioBackend for HeadlessAudio {
    fn play(&mut self, key: &str, looped: bool) -> Result<AudioHandle, AudioPlaybackError> {
        let mut inner = self.lock();
        if inner.blocked {
            return Err(AudioPlaybackError::Blocked(key.to_owned()));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.playing.insert(id, (key.to_owned(), looped));
        inner.started.push(key.to_owned());

        info!(target: "audio", "Playing `{}` (handle {}, loop: {})", key, id, looped);
        Ok(AudioHandle::new(id, key))
    }

    fn stop(&mut self, handle: &AudioHandle) {
        if self.lock().playing.remove(&handle.id()).is_some() {
            debug!(target: "audio", "Stopped `{}` (handle {})", handle.key(), handle.id());
        }
    }

    fn is_playing(&self, handle: &AudioHandle) -> bool {
        self.lock().playing.contains_key(&handle.id())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
