//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GlobalSystems: StateMachine (owned by orchestrator)
//   GlobalContext: input, assets, stage, widgets, runtime (passed to states)
//   SharedRuntimeState: audio flags and music, lives for the process
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;
mod runtime_state;

//=== Public API ==========================================================

pub use global_context::{FrameTime, GlobalContext};
pub use global_systems::GlobalSystems;
pub use runtime_state::{MusicTrack, SharedRuntimeState};
