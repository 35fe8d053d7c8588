//=========================================================================
// Options
//=========================================================================
//
// Music and sound toggles. Changes apply at once and the option label
// follows the flag.
//
//=========================================================================

use super::{menu_layout, title_style, MENU_BG};
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::state::{GameState, StateId};
use crate::core::ui::MenuBuilder;

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

fn music_label(enabled: bool) -> String {
    format!("Music: {}", on_off(enabled))
}

fn sound_label(enabled: bool) -> String {
    format!("Sound: {}", on_off(enabled))
}

#[derive(Default)]
pub struct Options;

impl Options {
    pub fn new() -> Self {
        Self
    }
}

impl GameState for Options {
    fn create(&mut self, ctx: &mut GlobalContext) {
        ctx.stage.add_sprite(0.0, 0.0, MENU_BG);

        let title = ctx.stage.add_text(ctx.stage.center_x(), 100.0, "Options", title_style());
        if let Some(object) = ctx.stage.get_mut(title) {
            object.anchor = (0.5, 0.5);
        }

        let mut menu = MenuBuilder::new(menu_layout(30.0, 200.0, 60.0));

        let label = music_label(ctx.runtime.music_enabled());
        menu.add_option(ctx, &label, |w| {
            let enabled = w.runtime.toggle_music();
            w.stage.set_text(w.widget, music_label(enabled));
        });

        let label = sound_label(ctx.runtime.sound_enabled());
        menu.add_option(ctx, &label, |w| {
            let enabled = w.runtime.toggle_sound();
            w.stage.set_text(w.widget, sound_label(enabled));
        });

        menu.add_option(ctx, "<- Back", |w| w.states.start(StateId::GameMenu));
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        if ctx.input_state.is_key_pressed(KeyCode::Escape) {
            ctx.transitions.start(StateId::GameMenu);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
