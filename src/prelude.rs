//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use arcade_shell::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and configuration
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems, SharedRuntimeState};

// Input
pub use crate::core::input::{InputEvent, KeyCode, MouseButton};

// States
pub use crate::core::state::{GameState, StateId};

// Assets
pub use crate::core::assets::{AssetKind, LoadProgress};

// Stage and widgets
pub use crate::core::stage::{Align, Color, Easing, Property, TextStyle};
pub use crate::core::ui::{MenuBuilder, MenuLayout, WidgetContext};
