//=========================================================================
// UI
//=========================================================================
//
// Pointer-driven widgets on top of the stage.
//
//   WidgetRegistry: hover styling + activation callbacks per text object
//   MenuBuilder:    vertically stacked options bound through the registry
//
//=========================================================================

//=== Module Declarations =================================================

mod menu;
mod widget;

//=== Public API ==========================================================

pub use menu::{MenuBuilder, MenuLayout, MenuOption};
pub use widget::{ActivateFn, WidgetContext, WidgetHandle, WidgetRegistry};
