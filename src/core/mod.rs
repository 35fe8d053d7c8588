//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for all game logic running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own GlobalSystems (state machine) and GlobalContext (shared data)
// - Receive platform events via crossbeam channel
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Stop ticking on fatal errors while leaving the window closable
//
// The orchestrator runs independently from the platform layer.
// Communication with the platform occurs only through message passing.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod audio;
pub mod error;
pub mod globals;
pub mod input;
pub mod stage;
pub mod state;
pub mod ui;

pub(crate) mod platform_bridge;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use assets::AssetLoader;
use audio::AudioBackend;
use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns all logic-thread data until the core thread is spawned.
pub(crate) struct CoreSystemsOrchestrator {
    systems: GlobalSystems,
    context: GlobalContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Builds systems and context but does not start the logic thread.
    pub(crate) fn new(config: &GameConfig, audio: Box<dyn AudioBackend>, loader: Box<dyn AssetLoader>) -> Self {
        Self {
            systems: GlobalSystems::new(loader),
            context: GlobalContext::new(config, audio),
        }
    }

    /// Gives the caller a chance to register states before the first tick.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems),
    {
        init_fn(&mut self.systems);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects input batches sent by the platform
    //  2. Runs the GlobalSystems pipeline with a fixed timestep
    //  3. Sleeps to maintain fixed pacing
    //  4. Exits on window close, channel disconnect or fatal error
    //
    pub(crate) fn spawn_core_thread(self, receiver: Receiver<PlatformEvent>, tps: f64) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut systems = self.systems;
            let mut context = self.context;
            let mut collector = EventCollector::new(receiver);

            if let Err(e) = systems.start(&mut context) {
                error!(target: "state", "Failed to enter initial state: {}", e);
                return;
            }

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }
                context.frame_events = collector.take_batches();

                //--- Step 2: Tick ------------------------------------------
                if let Err(e) = systems.update(&mut context, frame_duration) {
                    error!(target: "state", "Fatal error, logic stopped: {}", e);
                    break;
                }

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
