//=========================================================================
// Input Event Types
//
// Portable representation of the pointer and keyboard input the game
// shell reacts to.
//
// Only what menus and states consume is modelled: pointer position,
// button transitions and a handful of navigation keys. Everything else
// the platform reports collapses into `Unidentified` and is dropped.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (per-frame state)
//         ↓
//    WidgetRegistry / GameState::update
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; releasing it over a widget activates the widget.
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Keys the shell listens to.
///
/// Escape backs out of sub-menus, the rest are available to states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Enter,
    Escape,
    KeyM,
    KeyS,

    /// Any key not listed above.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Coordinates are logical pixels (top-left origin) in the same space as
/// the stage layout, so widget hit-testing needs no conversion.
///
/// `MouseMoved` events compare equal regardless of coordinates, which lets
/// the platform buffer coalesce them (last position wins).
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    MouseMoved { x: f32, y: f32 },
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b)) | (MouseButtonUp(a), MouseButtonUp(b)) => {
                a == b
            }
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes the discriminant and key/button; coordinates are ignored to stay
/// consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
