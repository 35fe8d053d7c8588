//=========================================================================
// Scheduled Transitions
//=========================================================================
//
// Delayed state starts owned by the active state, e.g. the short pause
// that lets "Ready!" render before the menu appears. Cancelled in full
// when the owning state exits.
//
//=========================================================================

use std::time::Duration;

use super::StateId;

#[derive(Debug, Default)]
pub struct ScheduledTransitions {
    pending: Vec<(Duration, StateId)>,
}

impl ScheduledTransitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `target` once `delay` has elapsed.
    pub fn schedule(&mut self, target: StateId, delay: Duration) {
        self.pending.push((delay, target));
    }

    /// Advances time and returns due targets in scheduling order.
    pub fn update(&mut self, dt: Duration) -> Vec<StateId> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(remaining, target)| {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                due.push(*target);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
