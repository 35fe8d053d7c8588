//=========================================================================
// Test Support
//=========================================================================
//
// Shared doubles for unit tests:
//
//   ManualLoader: AssetLoader completed by hand, one entry at a time
//   Harness:      GlobalSystems + GlobalContext driven tick by tick
//
//=========================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config::{AudioConfig, GameConfig};
use crate::core::assets::{AssetEntry, AssetLoader, BatchId, LoadEvent};
use crate::core::audio::HeadlessAudio;
use crate::core::error::AssetLoadError;
use crate::core::globals::{GlobalContext, GlobalSystems, SharedRuntimeState};
use crate::core::input::{InputEvent, KeyCode, MouseButton};
use crate::core::stage::ObjectId;
use crate::core::state::StateId;

//=== Context Helpers =====================================================

/// Context with default config and an observable headless backend.
pub(crate) fn context() -> (GlobalContext, HeadlessAudio) {
    let audio = HeadlessAudio::new();
    let ctx = GlobalContext::new(&GameConfig::default(), Box::new(audio.clone()));
    (ctx, audio)
}

pub(crate) fn runtime() -> (SharedRuntimeState, HeadlessAudio) {
    let audio = HeadlessAudio::new();
    let runtime = SharedRuntimeState::new(Box::new(audio.clone()), &AudioConfig::default());
    (runtime, audio)
}

//=== ManualLoader ========================================================

#[derive(Default)]
struct Shared {
    pending: Vec<(BatchId, AssetEntry)>,
    cancelled: Vec<(BatchId, AssetEntry)>,
    ready: Vec<LoadEvent>,
    requested: Vec<String>,
    contents: HashMap<String, Vec<u8>>,
}

/// Loader whose entries complete only when a test says so.
///
/// Clones share state, so a test keeps one clone and hands the other to
/// the state machine.
#[derive(Clone, Default)]
pub(crate) struct ManualLoader {
    shared: Arc<Mutex<Shared>>,
}

impl ManualLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap()
    }

    /// Bytes delivered for `key` instead of the default placeholder.
    pub(crate) fn set_content(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.lock().contents.insert(key.to_owned(), bytes.into());
    }

    /// Every key ever handed to `start`, in order.
    pub(crate) fn requested_keys(&self) -> Vec<String> {
        self.lock().requested.clone()
    }

    pub(crate) fn pending_keys(&self) -> Vec<String> {
        self.lock().pending.iter().map(|(_, e)| e.key.clone()).collect()
    }

    /// Completes the pending entry `key` successfully.
    pub(crate) fn complete(&self, key: &str) {
        let mut shared = self.lock();
        let (batch, entry) = take_entry(&mut shared.pending, key);
        let bytes = content_for(&shared, &entry);
        shared.ready.push(LoadEvent {
            batch,
            entry,
            outcome: Ok(bytes),
        });
    }

    /// Fails the pending entry `key` as not found.
    pub(crate) fn fail(&self, key: &str) {
        let mut shared = self.lock();
        let (batch, entry) = take_entry(&mut shared.pending, key);
        let error = AssetLoadError::NotFound {
            key: entry.key.clone(),
            path: entry.path.display().to_string(),
        };
        shared.ready.push(LoadEvent {
            batch,
            entry,
            outcome: Err(error),
        });
    }

    /// Completes every pending entry successfully.
    pub(crate) fn complete_all(&self) {
        for key in self.pending_keys() {
            self.complete(&key);
        }
    }

    /// Delivers an entry of a cancelled batch, as a slow worker would.
    pub(crate) fn complete_cancelled(&self, key: &str) {
        let mut shared = self.lock();
        let (batch, entry) = take_entry(&mut shared.cancelled, key);
        let bytes = content_for(&shared, &entry);
        shared.ready.push(LoadEvent {
            batch,
            entry,
            outcome: Ok(bytes),
        });
    }
}

fn take_entry(entries: &mut Vec<(BatchId, AssetEntry)>, key: &str) -> (BatchId, AssetEntry) {
    let index = entries
        .iter()
        .position(|(_, e)| e.key == key)
        .unwrap_or_else(|| panic!("no pending asset `{}`", key));
    entries.remove(index)
}

fn content_for(shared: &Shared, entry: &AssetEntry) -> Vec<u8> {
    shared
        .contents
        .get(&entry.key)
        .cloned()
        .unwrap_or_else(|| b"data".to_vec())
}

impl AssetLoader for ManualLoader {
    fn start(&mut self, batch: BatchId, entries: Vec<AssetEntry>) {
        let mut shared = self.lock();
        for entry in entries {
            shared.requested.push(entry.key.clone());
            shared.pending.push((batch, entry));
        }
    }

    fn poll(&mut self) -> Vec<LoadEvent> {
        std::mem::take(&mut self.lock().ready)
    }

    fn cancel(&mut self, batch: BatchId) {
        let mut shared = self.lock();
        let (cancelled, kept): (Vec<_>, Vec<_>) = shared.pending.drain(..).partition(|(b, _)| *b == batch);
        shared.pending = kept;
        shared.cancelled.extend(cancelled);
    }
}

//=== Harness =============================================================

pub(crate) const TICK: Duration = Duration::from_millis(16);

/// Full logic pipeline without a window.
pub(crate) struct Harness {
    pub(crate) ctx: GlobalContext,
    pub(crate) systems: GlobalSystems,
    pub(crate) loader: ManualLoader,
    pub(crate) audio: HeadlessAudio,
}

impl Harness {
    /// Installs the game and enters Boot.
    pub(crate) fn game() -> Self {
        let mut harness = Self::empty();
        crate::game::install(&mut harness.systems);
        harness.systems.start(&mut harness.ctx).unwrap();
        harness
    }

    pub(crate) fn empty() -> Self {
        let loader = ManualLoader::new();
        let (ctx, audio) = context();
        Self {
            ctx,
            systems: GlobalSystems::new(Box::new(loader.clone())),
            loader,
            audio,
        }
    }

    /// Keys playing right now, menu clicks left out.
    pub(crate) fn playing_music(&self) -> Vec<String> {
        self.audio
            .playing_keys()
            .into_iter()
            .filter(|key| key.as_str() != crate::game::CLICK_SOUND)
            .collect()
    }

    pub(crate) fn active(&self) -> Option<StateId> {
        self.systems.state_machine.active()
    }

    /// One tick with the given input.
    pub(crate) fn tick_with(&mut self, events: Vec<InputEvent>) {
        if !events.is_empty() {
            self.ctx.frame_events.push(events);
        }
        self.systems.update(&mut self.ctx, TICK).unwrap();
    }

    pub(crate) fn tick(&mut self) {
        self.tick_with(Vec::new());
    }

    /// Ticks until at least `duration` of logic time has passed.
    pub(crate) fn run_for(&mut self, duration: Duration) {
        let ticks = duration.as_millis().div_ceil(TICK.as_millis());
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Completes all pending loads and ticks once to apply them.
    pub(crate) fn finish_loading(&mut self) {
        self.loader.complete_all();
        self.tick();
    }

    /// Boots through Preload into the main menu.
    pub(crate) fn to_menu() -> Self {
        let mut harness = Self::game();
        harness.finish_loading(); // Boot
        harness.finish_loading(); // Preload
        harness.run_for(Duration::from_millis(120));
        assert_eq!(harness.active(), Some(StateId::GameMenu));
        harness
    }

    pub(crate) fn press(&mut self, key: KeyCode) {
        self.tick_with(vec![InputEvent::KeyDown(key)]);
        self.tick_with(vec![InputEvent::KeyUp(key)]);
    }

    /// Moves onto the object and clicks it with the left button.
    pub(crate) fn click(&mut self, object: ObjectId) {
        let rect = self
            .ctx
            .stage
            .bounds(object)
            .unwrap_or_else(|| panic!("object {:?} has no bounds", object));
        let (x, y) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);

        self.tick_with(vec![
            InputEvent::MouseMoved { x, y },
            InputEvent::MouseButtonDown(MouseButton::Left),
        ]);
        self.tick_with(vec![InputEvent::MouseButtonUp(MouseButton::Left)]);
    }

    /// Finds a text object by its content.
    pub(crate) fn find_text(&self, content: &str) -> Option<ObjectId> {
        self.ctx
            .stage
            .objects()
            .iter()
            .find(|o| self.ctx.stage.text(o.id) == Some(content))
            .map(|o| o.id)
    }

    pub(crate) fn click_text(&mut self, content: &str) {
        let object = self
            .find_text(content)
            .unwrap_or_else(|| panic!("no text `{}` on stage", content));
        self.click(object);
    }
}
