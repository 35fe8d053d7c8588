//=========================================================================
// Input
//=========================================================================
//
// Input events delivered by the platform and the per-frame tracker that
// states and widgets query.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;
