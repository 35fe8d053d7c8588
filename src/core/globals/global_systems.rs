//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains the state machine and coordinates the per-tick pipeline.
// Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::assets::AssetLoader;
use crate::core::error::RuntimeError;
use crate::core::state::{Phase, StateMachine};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `state_machine`: Registry and lifecycle of game states
pub struct GlobalSystems {
    /// Registers game states and runs the active one.
    ///
    /// Processes the transition queue from GlobalContext.
    pub state_machine: StateMachine,
}

impl GlobalSystems {
    /// Creates a systems container around the given asset loader.
    ///
    /// This is typically called internally by the engine. Users should access
    /// systems via [`crate::Engine::init`] instead.
    pub(crate) fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            state_machine: StateMachine::new(loader),
        }
    }

    /// Enters the initial state.
    pub(crate) fn start(&mut self, context: &mut GlobalContext) -> Result<(), RuntimeError> {
        self.state_machine.start(context)?;
        self.state_machine.process_commands(context)
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all engine systems for the current tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Clock**: Advances logic time by `dt`
    /// 2. **Input**: Applies this tick's input batches to `input_state`
    /// 3. **Loading**: Applies finished asset loads, possibly running `create`
    /// 4. **Widgets**: Hover styling and activation callbacks
    /// 5. **Tweens**: Advances animations
    /// 6. **Scheduled**: Queues delayed transitions that came due
    /// 7. **State Update**: Updates the active state
    /// 8. **Commands**: Applies queued registrations and transitions
    ///
    /// A returned error is fatal; the caller should stop ticking.
    pub(crate) fn update(&mut self, context: &mut GlobalContext, dt: Duration) -> Result<(), RuntimeError> {
        // 1. Advance the clock
        context.time.advance(dt);

        // 2. Process input events into state
        context.input_state.clear();
        for batch in &context.frame_events {
            context.input_state.process_events(batch);
        }
        context.frame_events.clear();

        // 3. Finish pending loads
        self.state_machine.poll_loading(context)?;

        // 4. Dispatch pointer input to widgets of a created state
        if self.state_machine.phase() == Phase::Running {
            context.widgets.dispatch(
                &context.input_state,
                &mut context.stage,
                &mut context.runtime,
                &mut context.transitions,
            );
        }

        // 5. Animate
        context.tweens.update(dt, &mut context.stage);

        // 6. Fire delayed transitions
        for target in context.scheduled.update(dt) {
            context.transitions.start(target);
        }

        // 7. Update the active state
        self.state_machine.update_active(context);

        // 8. Apply state commands
        self.state_machine.process_commands(context)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
