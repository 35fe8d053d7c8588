//=========================================================================
// Platform Subsystem
//=========================================================================
//
// The window and its input, on the main thread.
//
// Architecture:
// ```text
//  Main Thread                          Logic Thread
//  ┌───────────────────────────┐       ┌───────────────────┐
//  │ winit event loop          │       │ EventCollector    │
//  │   ↓                       │       │   ↓               │
//  │ InputProcessor            │       │ StateTracker      │
//  │   (logical pixels, keys)  │       │   ↓               │
//  │   ↓                       │       │ WidgetRegistry    │
//  │ InputBuffer               │       │ active GameState  │
//  │   ↓ on RedrawRequested    │       └───────────────────┘
//  │ Sender<PlatformEvent> ────┼──────────────┘
//  └───────────────────────────┘
// ```
//
// One batch per redraw; empty frames send nothing. A pointer leaving the
// window is reported as an off-stage move. The window stays closable
// after the logic thread has stopped.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::config::WindowConfig;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Owns the window and forwards its input to the logic thread. Not `Send`;
/// winit requires the main thread on some targets.
pub(crate) struct Platform {
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    processor: InputProcessor,
    sender: Sender<PlatformEvent>,
    logic_gone: bool,
}

impl Platform {
    pub(crate) fn new(sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            processor: InputProcessor::new(),
            sender,
            logic_gone: false,
        }
    }

    /// Blocks on the event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        info!(target: "platform", "Opening \"{}\" ({}x{})", self.config.title, self.config.width, self.config.height);

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Frame Boundary ---------------------------------------------------

    /// Sends this frame's input. Once the logic thread is gone input is
    /// dropped, with a single warning.
    fn end_frame(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        if self.logic_gone {
            return;
        }

        trace!(
            target: "platform::input",
            "Frame input: {} discrete, {} pointer",
            discrete.len(),
            continuous.len()
        );

        if self.sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(target: "platform::input", "Logic thread stopped, input from now on is dropped");
            self.logic_gone = true;
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        // The receiver may already be gone after a fatal error.
        let _ = self.sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false)
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                let scale = window.scale_factor();
                debug!(target: "platform", "Window ready, scale factor {}", scale);
                self.processor.set_scale_factor(scale);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window closed");
                self.close(event_loop);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor now {}", scale_factor);
                self.processor.set_scale_factor(scale_factor);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.push_continuous(self.processor.process_mouse_move(position));
            }
            WindowEvent::CursorLeft { .. } => {
                self.buffer.push_continuous(self.processor.process_cursor_left());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = self.processor.process_key_event(&event) {
                    self.buffer.push_discrete(input);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.buffer.push_discrete(self.processor.process_mouse_button(button, state));
            }
            WindowEvent::RedrawRequested => {
                self.end_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
