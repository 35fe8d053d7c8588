//=========================================================================
// Engine
//=========================================================================
//
// Main entry point and coordinator for the shell.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ init(): register states
//         ├─ with_tps()              └─ run(): spawns logic thread,
//         ├─ with_channel_capacity()           runs platform,
//         ├─ with_audio()                      blocks until exit
//         └─ with_loader()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::assets::{AssetLoader, FileLoader};
use crate::core::audio::{AudioBackend, HeadlessAudio};
use crate::core::globals::GlobalSystems;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: 800×600, "Arcade"
/// - **Audio**: [`HeadlessAudio`]
/// - **Assets**: [`FileLoader`] rooted at `assets/`
///
/// # Examples
///
/// ```no_run
/// use arcade_shell::{game, EngineBuilder};
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .build()
///     .init(game::install)
///     .run();
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    audio: Option<Box<dyn AudioBackend>>,
    loader: Option<Box<dyn AssetLoader>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            audio: None,
            loader: None,
        }
    }

    /// Replaces every setting with `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` holds a non-positive TPS or channel capacity.
    /// [`GameConfig::load`] already rejects those.
    pub fn with_config(self, config: GameConfig) -> Self {
        let tps = config.tps;
        let capacity = config.channel_capacity;
        Self { config, ..self }.with_tps(tps).with_channel_capacity(capacity)
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Audio backend the shared runtime state plays through.
    pub fn with_audio(mut self, audio: Box<dyn AudioBackend>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Loader used for every state's asset manifest.
    pub fn with_loader(mut self, loader: Box<dyn AssetLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Builds the engine. States are registered afterwards via
    /// [`Engine::init`].
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, assets: {})",
            self.config.tps,
            self.config.channel_capacity,
            self.config.asset_root.display()
        );

        let audio = self.audio.unwrap_or_else(|| Box::new(HeadlessAudio::new()));
        let loader = self
            .loader
            .unwrap_or_else(|| Box::new(FileLoader::new(self.config.asset_root.clone())));

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(&self.config, audio, loader),
            config: self.config,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Shell runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► StateMachine, widgets, tweens, audio
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    config: GameConfig,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to [`GlobalSystems`] before the first tick,
    /// typically to register states and pick the initial one.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window is closed.
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop on this thread
    /// 4. On window close the logic thread is joined
    ///
    /// A fatal error on the logic thread stops ticking but leaves the
    /// window open until the user closes it.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.config.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.config.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.config.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.config.window.clone());
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Wait for logic thread to terminate ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
