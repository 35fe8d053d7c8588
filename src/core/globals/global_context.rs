//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for game states.
//
// Contains state data that game states read/write:
// - input_state: Per-frame keyboard and pointer state
// - transitions: Command queue for state registration and changes
// - load / assets: Asset declarations and loaded asset bytes
// - runtime: Audio flags and the music player
// - stage / tweens / widgets / scheduled: Per-state presentation
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::SharedRuntimeState;
use crate::config::GameConfig;
use crate::core::assets::{AssetCache, AssetEntry, AssetKind, AssetManifest};
use crate::core::audio::AudioBackend;
use crate::core::input::{InputEvent, StateTracker};
use crate::core::stage::{Align, Color, Stage, TextStyle, TweenManager, FALLBACK_FAMILY};
use crate::core::state::{ScheduledTransitions, TransitionQueue};
use crate::core::ui::WidgetRegistry;

//=== FrameTime ===========================================================

/// Logic clock, advanced once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTime {
    /// Time covered by the current tick.
    pub delta: Duration,

    /// Total time since the engine started ticking.
    pub elapsed: Duration,
}

impl FrameTime {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.delta = dt;
        self.elapsed += dt;
    }
}

//=== GlobalContext =======================================================

/// Shared context data accessible to game states during their lifecycle.
///
/// States receive `&mut GlobalContext` in every hook. This separates
/// state-accessible data from the machine that drives them.
///
/// Everything under "per-state" is torn down when the active state exits;
/// `assets`, `runtime` and loaded fonts outlive every state.
pub struct GlobalContext {
    /// Keyboard and pointer state for the current tick.
    pub input_state: StateTracker,

    /// Queue for registering and starting states.
    ///
    /// Applied by the state machine at the tick boundary.
    pub transitions: TransitionQueue,

    /// Assets the entering state wants loaded before its `create`.
    ///
    /// Only read after `preload`; declarations made elsewhere are dropped.
    pub load: AssetManifest,

    /// Every asset loaded so far.
    pub assets: AssetCache,

    /// Audio flags and music, shared across all states.
    pub runtime: SharedRuntimeState,

    /// Logic clock.
    pub time: FrameTime,

    //--- Per-state --------------------------------------------------------
    pub stage: Stage,
    pub tweens: TweenManager,
    pub widgets: WidgetRegistry,
    pub scheduled: ScheduledTransitions,

    /// Input batches received this tick. Consumed by GlobalSystems.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    /// Creates a context sized for the configured window.
    pub(crate) fn new(config: &GameConfig, audio: Box<dyn AudioBackend>) -> Self {
        Self {
            input_state: StateTracker::new(),
            transitions: TransitionQueue::new(),
            load: AssetManifest::new(),
            assets: AssetCache::new(),
            runtime: SharedRuntimeState::new(audio, &config.audio),
            time: FrameTime::default(),
            stage: Stage::new(config.window.width as f32, config.window.height as f32),
            tweens: TweenManager::new(),
            widgets: WidgetRegistry::new(),
            scheduled: ScheduledTransitions::new(),
            frame_events: Vec::new(),
        }
    }

    //--- State Lifecycle Support ------------------------------------------

    /// Drops everything the exiting state put on screen or scheduled.
    pub(crate) fn teardown_state(&mut self) {
        debug!(
            target: "state",
            "Tearing down {} objects, {} widgets, {} tweens, {} scheduled",
            self.stage.len(),
            self.widgets.len(),
            self.tweens.len(),
            self.scheduled.len()
        );
        self.widgets.dispose_all();
        self.tweens.clear();
        self.scheduled.cancel_all();
        self.stage.clear();
        self.load.clear();
    }

    /// Stores a loaded asset. Fonts also become usable on the stage.
    pub(crate) fn store_asset(&mut self, entry: &AssetEntry, bytes: Vec<u8>) {
        if entry.kind == AssetKind::Font {
            self.stage.register_font(&entry.key);
        }
        self.assets.insert(entry, bytes);
    }

    /// Replaces the stage with a single error message.
    pub(crate) fn show_fatal(&mut self, message: &str) {
        self.widgets.dispose_all();
        self.tweens.clear();
        self.stage.clear();

        let style = TextStyle::new(FALLBACK_FAMILY, 20.0)
            .fill(Color::hex(0xFF6B6B))
            .align(Align::Center);
        let x = self.stage.center_x();
        let y = self.stage.height() / 2.0;
        let id = self.stage.add_text(x, y, message, style);
        if let Some(object) = self.stage.get_mut(id) {
            object.anchor = (0.5, 0.5);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
