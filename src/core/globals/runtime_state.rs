//=========================================================================
// Shared Runtime State
//=========================================================================
//
// Process-wide game settings and the music player.
//
// Created once by the engine and handed to every state through the
// context. All music changes go through `switch_music`, which stops the
// current handle before starting the next, so at most one track plays.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::AudioConfig;
use crate::core::audio::{AudioBackend, AudioHandle};

//=== MusicTrack ==========================================================

/// The one music track that may be playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicTrack {
    pub name: String,
    pub handle: AudioHandle,
}

//=== SharedRuntimeState ==================================================

/// Sound/music flags, current music track and live sound effects.
pub struct SharedRuntimeState {
    sound_enabled: bool,
    music_enabled: bool,
    current_track: Option<MusicTrack>,
    sounds: Vec<AudioHandle>,
    audio: Box<dyn AudioBackend>,
}

impl SharedRuntimeState {
    pub fn new(audio: Box<dyn AudioBackend>, config: &AudioConfig) -> Self {
        Self {
            sound_enabled: config.sound_enabled,
            music_enabled: config.music_enabled,
            current_track: None,
            sounds: Vec::new(),
            audio,
        }
    }

    //--- Flags ------------------------------------------------------------

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Enables or disables music. Disabling stops the current track at
    /// once; enabling never starts one by itself.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        info!(target: "audio", "Music {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            self.stop_music();
        }
    }

    /// Enables or disables sound effects. Disabling stops live effects.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        info!(target: "audio", "Sound {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            for handle in self.sounds.drain(..) {
                self.audio.stop(&handle);
            }
        }
    }

    /// Flips the music flag and returns the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.set_music_enabled(!self.music_enabled);
        self.music_enabled
    }

    /// Flips the sound flag and returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.set_sound_enabled(!self.sound_enabled);
        self.sound_enabled
    }

    //--- Music ------------------------------------------------------------

    pub fn current_track(&self) -> Option<&MusicTrack> {
        self.current_track.as_ref()
    }

    pub fn current_track_name(&self) -> Option<&str> {
        self.current_track.as_ref().map(|track| track.name.as_str())
    }

    /// Stops whatever is playing and starts `name`, even if `name` is the
    /// current track. Does nothing while music is disabled.
    pub fn switch_music(&mut self, name: &str, looped: bool) {
        if !self.music_enabled {
            debug!(target: "audio", "Music disabled, not starting `{}`", name);
            return;
        }

        self.stop_music();

        match self.audio.play(name, looped) {
            Ok(handle) => {
                self.current_track = Some(MusicTrack {
                    name: name.to_owned(),
                    handle,
                });
            }
            Err(e) => warn!(target: "audio", "Music `{}` not started: {}", name, e),
        }
    }

    /// Starts `name` unless it is already the current track.
    pub fn ensure_music(&mut self, name: &str, looped: bool) {
        if self.current_track_name() == Some(name) {
            debug!(target: "audio", "`{}` already playing", name);
            return;
        }
        self.switch_music(name, looped);
    }

    pub fn stop_music(&mut self) {
        if let Some(track) = self.current_track.take() {
            self.audio.stop(&track.handle);
        }
    }

    //--- Sound Effects ----------------------------------------------------

    /// Plays a one-shot effect if sound is enabled.
    pub fn play_sound(&mut self, name: &str) {
        if !self.sound_enabled {
            return;
        }

        let audio = &self.audio;
        self.sounds.retain(|handle| audio.is_playing(handle));

        match self.audio.play(name, false) {
            Ok(handle) => self.sounds.push(handle),
            Err(e) => warn!(target: "audio", "Sound `{}` not played: {}", name, e),
        }
    }

    /// Read access to the backend, for queries such as `is_playing`.
    pub fn audio(&self) -> &dyn AudioBackend {
        self.audio.as_ref()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
