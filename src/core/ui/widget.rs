//=========================================================================
// Widgets
//=========================================================================
//
// Pointer bindings on stage text objects.
//
// A binding swaps between a default and a hover style as the pointer
// enters and leaves the object's bounds, and runs its callback when the
// left button is released over it. Bindings are disposed through their
// handle or all at once when the owning state exits.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::globals::SharedRuntimeState;
use crate::core::input::{MouseButton, StateTracker};
use crate::core::stage::{ObjectId, Stage, TextStyle};
use crate::core::state::TransitionQueue;

//=== Callback Types ======================================================

/// What an activation callback may touch.
pub struct WidgetContext<'a> {
    /// Object the activated widget is bound to.
    pub widget: ObjectId,
    pub stage: &'a mut Stage,
    pub runtime: &'a mut SharedRuntimeState,
    pub states: &'a mut TransitionQueue,
}

pub type ActivateFn = Box<dyn FnMut(&mut WidgetContext<'_>) + Send>;

//=== Handles =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(u64);

struct Binding {
    handle: WidgetHandle,
    object: ObjectId,
    default_style: TextStyle,
    hover_style: TextStyle,
    on_activate: ActivateFn,
    hovered: bool,
}

//=== WidgetRegistry ======================================================

#[derive(Default)]
pub struct WidgetRegistry {
    bindings: Vec<Binding>,
    next_id: u64,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Binding ----------------------------------------------------------

    /// Binds hover styling and an activation callback to `object`.
    pub fn bind<F>(
        &mut self,
        object: ObjectId,
        default_style: TextStyle,
        hover_style: TextStyle,
        on_activate: F,
    ) -> WidgetHandle
    where
        F: FnMut(&mut WidgetContext<'_>) + Send + 'static,
    {
        self.next_id += 1;
        let handle = WidgetHandle(self.next_id);
        self.bindings.push(Binding {
            handle,
            object,
            default_style,
            hover_style,
            on_activate: Box::new(on_activate),
            hovered: false,
        });
        handle
    }

    /// Removes a binding. Its callback never runs again.
    pub fn dispose(&mut self, handle: WidgetHandle) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.handle != handle);
        self.bindings.len() != before
    }

    pub fn dispose_all(&mut self) {
        if !self.bindings.is_empty() {
            debug!(target: "ui", "Disposing {} widget bindings", self.bindings.len());
        }
        self.bindings.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_hovered(&self, handle: WidgetHandle) -> bool {
        self.binding(handle).is_some_and(|b| b.hovered)
    }

    fn binding(&self, handle: WidgetHandle) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.handle == handle)
    }

    fn binding_mut(&mut self, handle: WidgetHandle) -> Option<&mut Binding> {
        self.bindings.iter_mut().find(|b| b.handle == handle)
    }

    //--- Pointer Events ---------------------------------------------------

    pub fn pointer_enter(&mut self, handle: WidgetHandle, stage: &mut Stage) {
        if let Some(binding) = self.binding_mut(handle) {
            enter(binding, stage);
        }
    }

    pub fn pointer_leave(&mut self, handle: WidgetHandle, stage: &mut Stage) {
        if let Some(binding) = self.binding_mut(handle) {
            leave(binding, stage);
        }
    }

    /// Runs the callback of `handle`. Returns `false` if it is not bound.
    pub fn activate(
        &mut self,
        handle: WidgetHandle,
        stage: &mut Stage,
        runtime: &mut SharedRuntimeState,
        states: &mut TransitionQueue,
    ) -> bool {
        let Some(binding) = self.binding_mut(handle) else {
            return false;
        };
        activate(binding, stage, runtime, states);
        true
    }

    //--- Frame Dispatch ---------------------------------------------------

    /// Derives enter/leave/activate from this frame's input.
    pub(crate) fn dispatch(
        &mut self,
        input: &StateTracker,
        stage: &mut Stage,
        runtime: &mut SharedRuntimeState,
        states: &mut TransitionQueue,
    ) {
        let pointer = input.pointer_position();
        for binding in &mut self.bindings {
            let over = stage.bounds(binding.object).is_some_and(|r| r.contains(pointer));
            match (over, binding.hovered) {
                (true, false) => enter(binding, stage),
                (false, true) => leave(binding, stage),
                _ => {}
            }
        }

        if !input.is_button_released(MouseButton::Left) {
            return;
        }
        for binding in self.bindings.iter_mut().filter(|b| b.hovered) {
            activate(binding, stage, runtime, states);
        }
    }
}

//=== Binding Helpers =====================================================

fn enter(binding: &mut Binding, stage: &mut Stage) {
    binding.hovered = true;
    stage.set_style(binding.object, binding.hover_style.clone());
}

fn leave(binding: &mut Binding, stage: &mut Stage) {
    binding.hovered = false;
    stage.set_style(binding.object, binding.default_style.clone());
}

fn activate(
    binding: &mut Binding,
    stage: &mut Stage,
    runtime: &mut SharedRuntimeState,
    states: &mut TransitionQueue,
) {
    trace!(target: "ui", "Activating widget {:?}", binding.handle);
    let mut ctx = WidgetContext {
        widget: binding.object,
        stage,
        runtime,
        states,
    };
    (binding.on_activate)(&mut ctx);
}

//=========================================================================
// Unit Tests
//=========================================================================
