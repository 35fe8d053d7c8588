//=========================================================================
// State System
//=========================================================================
//
// Named, mutually exclusive application modes and the machine that
// sequences them.
//
// Architecture:
//   StateMachine
//     ├─ registry: HashMap<StateId, Box<dyn GameState>>
//     ├─ active: Option<StateId>
//     └─ phase: Idle | Loading(batch) | Running
//
// Flow:
//   transition() → shutdown(old) → teardown → preload(new)
//     → [assets load asynchronously] → create(new) → update() per tick
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use crate::core::assets::LoadProgress;
use crate::core::error::UnknownStateError;
use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod scheduled;
mod state_machine;
mod transition_queue;

//=== Public API ==========================================================

pub use scheduled::ScheduledTransitions;
pub use state_machine::{Phase, StateMachine};
pub use transition_queue::{StateCommand, TransitionQueue};

//=== StateId =============================================================

/// The fixed set of game states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Boot,
    Preload,
    GameMenu,
    TheGame,
    Options,
    Credits,
    GameOver,
}

impl StateId {
    pub const ALL: [StateId; 7] = [
        StateId::Boot,
        StateId::Preload,
        StateId::GameMenu,
        StateId::TheGame,
        StateId::Options,
        StateId::Credits,
        StateId::GameOver,
    ];

    /// Registration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Boot => "Boot",
            Self::Preload => "Preload",
            Self::GameMenu => "GameMenu",
            Self::TheGame => "TheGame",
            Self::Options => "Options",
            Self::Credits => "Credits",
            Self::GameOver => "GameOver",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StateId {
    type Err = UnknownStateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| UnknownStateError::new(name))
    }
}

//=== GameState Trait =====================================================

/// Lifecycle of a game state.
///
/// Only `create` is required. The machine guarantees:
///
/// - `preload` runs on entry and may declare assets through `ctx.load`
/// - `create` runs once every declared asset has finished loading
/// - `update` runs once per tick, only after `create`
/// - `shutdown` runs on exit, before the context tears down the stage,
///   widgets, tweens and scheduled transitions of this state
pub trait GameState: Send {
    fn preload(&mut self, _ctx: &mut GlobalContext) {}

    fn create(&mut self, ctx: &mut GlobalContext);

    fn update(&mut self, _ctx: &mut GlobalContext) {}

    fn shutdown(&mut self, _ctx: &mut GlobalContext) {}

    /// Called after each asset of this state's batch completes.
    fn load_progress(&mut self, _ctx: &mut GlobalContext, _progress: LoadProgress) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
