//=========================================================================
// Transition Queue
//=========================================================================
//
// Commands states and widget callbacks issue to the state machine.
//
// States cannot reach the machine while it is calling into them, so they
// queue registrations and starts here. The machine applies the queue in
// FIFO order at the tick boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{GameState, StateId};

//=== StateCommand ========================================================

pub enum StateCommand {
    /// Adds (or replaces) a state in the registry.
    Register(StateId, Box<dyn GameState>),

    /// Transitions to a registered state.
    Start(StateId),
}

impl fmt::Debug for StateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(id, _) => f.debug_tuple("Register").field(id).finish(),
            Self::Start(id) => f.debug_tuple("Start").field(id).finish(),
        }
    }
}

//=== TransitionQueue =====================================================

#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<StateCommand>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues registration of `state` under `id`.
    pub fn register(&mut self, id: StateId, state: Box<dyn GameState>) {
        self.queue.push(StateCommand::Register(id, state));
    }

    /// Queues a transition to `id`.
    pub fn start(&mut self, id: StateId) {
        self.queue.push(StateCommand::Start(id));
    }

    /// Most recently queued start target, if any.
    pub fn pending_start(&self) -> Option<StateId> {
        self.queue.iter().rev().find_map(|command| match command {
            StateCommand::Start(id) => Some(*id),
            StateCommand::Register(..) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all queued commands, leaving the queue empty.
    pub fn take(&mut self) -> Vec<StateCommand> {
        std::mem::take(&mut self.queue)
    }
}
