//=========================================================================
// Game Menu
//=========================================================================

use super::{menu_layout, title_style, MENU_BG, MENU_MUSIC};
use crate::core::globals::GlobalContext;
use crate::core::state::{GameState, StateId};
use crate::core::ui::MenuBuilder;

const TITLE: &str = "Game Title";
const TITLE_Y: f32 = 100.0;

/// Main menu: title and the Start, Options and Credits entries.
#[derive(Default)]
pub struct GameMenu;

impl GameMenu {
    pub fn new() -> Self {
        Self
    }
}

impl GameState for GameMenu {
    fn create(&mut self, ctx: &mut GlobalContext) {
        // Returning from Options must not restart the track.
        ctx.runtime.ensure_music(MENU_MUSIC, true);

        ctx.stage.add_sprite(0.0, 0.0, MENU_BG);

        let title = ctx.stage.add_text(ctx.stage.center_x(), TITLE_Y, TITLE, title_style());
        if let Some(object) = ctx.stage.get_mut(title) {
            object.anchor = (0.5, 0.5);
        }

        let mut menu = MenuBuilder::new(menu_layout(30.0, 200.0, 60.0));
        menu.add_option(ctx, "Start", |w| w.states.start(StateId::TheGame));
        menu.add_option(ctx, "Options", |w| w.states.start(StateId::Options));
        menu.add_option(ctx, "Credits", |w| w.states.start(StateId::Credits));
    }
}
