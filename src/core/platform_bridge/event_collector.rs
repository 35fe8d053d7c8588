//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side inbox for platform events.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → frame batches → TickControl
//
// Each platform frame becomes one batch with its pointer position ahead of
// its key and button events, so a release is hit-tested where the cursor
// was at that frame. Frames that only moved the pointer collapse into the
// latest one. Draining is bounded per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

const MAX_MESSAGES_PER_TICK: usize = 100;
const IDLE_SLEEP: Duration = Duration::from_millis(2);

//=== TickControl =========================================================

/// Whether the logic loop keeps ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

struct FrameBatch {
    events: Vec<InputEvent>,
    pointer_only: bool,
}

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frames: Vec<FrameBatch>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frames: Vec::with_capacity(4),
        }
    }

    /// Drains what the platform sent since the last tick.
    ///
    /// Returns `Exit` on window close or when the platform side hung up.
    /// Sleeps briefly when nothing arrived.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.frames.clear();
        let mut received = 0;

        while received < MAX_MESSAGES_PER_TICK {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    self.push_frame(discrete, continuous);
                    received += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if received >= MAX_MESSAGES_PER_TICK {
            warn!(target: "platform", "Input backlog: {} platform frames in one tick", received);
        } else if received > 1 {
            trace!(target: "platform", "{} platform frames folded into {} batches", received, self.frames.len());
        }

        if received == 0 {
            thread::sleep(IDLE_SLEEP);
        }

        TickControl::Continue
    }

    fn push_frame(&mut self, discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) {
        let pointer_only = discrete.is_empty();
        let mut events = continuous;
        events.extend(discrete);
        if events.is_empty() {
            return;
        }

        match self.frames.last_mut() {
            Some(last) if last.pointer_only && pointer_only => last.events = events,
            _ => self.frames.push(FrameBatch { events, pointer_only }),
        }
    }

    #[cfg(test)]
    pub(crate) fn batch_count(&self) -> usize {
        self.frames.len()
    }

    /// Hands this tick's batches to the caller, oldest first.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        self.frames.drain(..).map(|frame| frame.events).collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
