//=========================================================================
// State Tracker
//=========================================================================
//
// Per-frame input state: what is held, what changed this frame, and
// where the pointer is.
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks held keys/buttons and their per-frame transitions.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    pointer: (f32, f32),

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed: HashSet<KeyCode>,
    buttons_released: HashSet<MouseButton>,
    pointer_moved: bool,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            pointer: (-1.0, -1.0),
            keys_pressed: HashSet::new(),
            buttons_released: HashSet::new(),
            pointer_moved: false,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.buttons_released.clear();
        self.pointer_moved = false;
    }

    /// Applies a batch of events in order.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown(button) => {
                self.buttons_down.insert(button);
            }
            InputEvent::MouseButtonUp(button) => {
                // A release without a press (e.g. pressed outside the window)
                // does not activate anything.
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.pointer = (x, y);
                self.pointer_moved = true;
            }
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// `true` on the frame a key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while a key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` while a button is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// `true` on the frame a held button was released.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Pointer position in logical pixels; `(-1, -1)` before the first move.
    pub fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }

    /// `true` if the pointer moved this frame.
    pub fn pointer_moved(&self) -> bool {
        self.pointer_moved
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        tracker.clear();
        tracker.process_events(&[InputEvent::KeyDown(KeyCode::Escape)]);
        assert!(tracker.is_key_pressed(KeyCode::Escape));
        assert!(tracker.is_key_down(KeyCode::Escape));

        tracker.clear();
        tracker.process_events(&[]);
        assert!(!tracker.is_key_pressed(KeyCode::Escape));
        assert!(tracker.is_key_down(KeyCode::Escape));

        tracker.clear();
        tracker.process_events(&[InputEvent::KeyUp(KeyCode::Escape)]);
        assert!(!tracker.is_key_down(KeyCode::Escape));
    }

    #[test]
    fn button_release_requires_prior_press() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert!(!tracker.is_button_released(MouseButton::Left));

        tracker.clear();
        tracker.process_events(&[
            InputEvent::MouseButtonDown(MouseButton::Left),
            InputEvent::MouseButtonUp(MouseButton::Left),
        ]);
        assert!(tracker.is_button_released(MouseButton::Left));
        assert!(!tracker.is_button_down(MouseButton::Left));

        tracker.clear();
        assert!(!tracker.is_button_released(MouseButton::Left));
    }

    #[test]
    fn pointer_position_persists_across_frames() {
        let mut tracker = StateTracker::new();
        assert_eq!(tracker.pointer_position(), (-1.0, -1.0));

        tracker.process_events(&[InputEvent::MouseMoved { x: 40.0, y: 290.0 }]);
        assert!(tracker.pointer_moved());

        tracker.clear();
        assert!(!tracker.pointer_moved());
        assert_eq!(tracker.pointer_position(), (40.0, 290.0));
    }
}
