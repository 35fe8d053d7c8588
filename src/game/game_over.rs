//=========================================================================
// Game Over
//=========================================================================

use super::{menu_layout, title_style, GAMEOVER_BG};
use crate::core::globals::GlobalContext;
use crate::core::state::{GameState, StateId};
use crate::core::ui::MenuBuilder;

#[derive(Default)]
pub struct GameOver;

impl GameOver {
    pub fn new() -> Self {
        Self
    }
}

impl GameState for GameOver {
    fn create(&mut self, ctx: &mut GlobalContext) {
        ctx.stage.add_sprite(0.0, 0.0, GAMEOVER_BG);

        let header = ctx.stage.add_text(ctx.stage.center_x(), 100.0, "Game Over", title_style());
        if let Some(object) = ctx.stage.get_mut(header) {
            object.anchor = (0.5, 0.5);
        }

        let mut menu = MenuBuilder::new(menu_layout(30.0, 200.0, 60.0));
        menu.add_option(ctx, "Play again", |w| w.states.start(StateId::TheGame));
        menu.add_option(ctx, "Main menu", |w| w.states.start(StateId::GameMenu));
    }
}
