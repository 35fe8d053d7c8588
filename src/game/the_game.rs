//=========================================================================
// The Game
//=========================================================================
//
// Placeholder play state: a running timer and a way out.
//
//=========================================================================

use std::time::Duration;

use log::info;

use super::{menu_layout, FONT};
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::stage::{ObjectId, TextStyle};
use crate::core::state::{GameState, StateId};
use crate::core::ui::MenuBuilder;

fn timer_label(elapsed: Duration) -> String {
    format!("Time: {:.1}s", elapsed.as_secs_f32())
}

#[derive(Default)]
pub struct TheGame {
    elapsed: Duration,
    timer: Option<ObjectId>,
}

impl TheGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time played in the current round.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl GameState for TheGame {
    fn create(&mut self, ctx: &mut GlobalContext) {
        self.elapsed = Duration::ZERO;
        self.timer = Some(ctx.stage.add_text(30.0, 30.0, timer_label(self.elapsed), TextStyle::new(FONT, 40.0)));

        let mut menu = MenuBuilder::new(menu_layout(30.0, 420.0, 30.0));
        menu.add_option(ctx, "Give up", |w| w.states.start(StateId::GameOver));
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        self.elapsed += ctx.time.delta;
        if let Some(timer) = self.timer {
            ctx.stage.set_text(timer, timer_label(self.elapsed));
        }

        if ctx.input_state.is_key_pressed(KeyCode::Escape) {
            ctx.transitions.start(StateId::GameOver);
        }
    }

    fn shutdown(&mut self, _ctx: &mut GlobalContext) {
        info!(target: "state", "Round over after {:.1}s", self.elapsed.as_secs_f32());
        self.timer = None;
    }
}
