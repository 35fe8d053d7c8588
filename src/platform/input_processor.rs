//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Cursor positions arrive in physical pixels and are converted to logical
// pixels with the window's current scale factor, so layout coordinates
// match what states place on the stage. Key repeats and unmapped keys
// are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    scale_factor: f64,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    //--- Scale Factor -----------------------------------------------------

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    #[cfg(test)]
    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a key event, dropping repeats and unmapped keys.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        self.process_key(code, key_event.state)
    }

    pub(crate) fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(button),
            ElementState::Released => InputEvent::MouseButtonUp(button),
        }
    }

    /// Creates a pointer event in logical pixels.
    pub(crate) fn process_mouse_move(&self, position: PhysicalPosition<f64>) -> InputEvent {
        let logical = position.to_logical::<f32>(self.scale_factor);
        InputEvent::MouseMoved {
            x: logical.x,
            y: logical.y,
        }
    }

    /// Pointer left the window. Reported as the off-stage position so
    /// hovered widgets drop their hover style.
    pub(crate) fn process_cursor_left(&self) -> InputEvent {
        InputEvent::MouseMoved { x: -1.0, y: -1.0 }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps the keys the game reacts to. Everything else is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::KeyM => KeyCode::KeyM,
            WinitKeyCode::KeyS => KeyCode::KeyS,
            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_converted_to_logical_pixels() {
        let mut processor = InputProcessor::new();
        processor.set_scale_factor(2.0);

        let event = processor.process_mouse_move(PhysicalPosition::new(80.0, 580.0));
        match event {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (40.0, 290.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }

    #[test]
    fn cursor_left_moves_pointer_off_stage() {
        let processor = InputProcessor::new();
        match processor.process_cursor_left() {
            InputEvent::MouseMoved { x, y } => assert!(x < 0.0 && y < 0.0),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }

    #[test]
    fn invalid_scale_factor_is_ignored() {
        let mut processor = InputProcessor::new();
        processor.set_scale_factor(0.0);
        assert_eq!(processor.scale_factor(), 1.0);
    }

    #[test]
    fn escape_press_and_release() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_key(WinitKeyCode::Escape, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::Escape))
        );
        assert_eq!(
            processor.process_key(WinitKeyCode::Escape, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::Escape))
        );
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed), None);
    }

    #[test]
    fn mouse_button_conversion() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released),
            InputEvent::MouseButtonUp(MouseButton::Left)
        );
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
