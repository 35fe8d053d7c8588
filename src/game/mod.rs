//=========================================================================
// Game
//=========================================================================
//
// The game's states, asset keys and shared text styles.
//
// Flow:
//   Boot → Preload → GameMenu ⇄ { Options, Credits, TheGame }
//   TheGame → GameOver → { TheGame, GameMenu }
//
// Only Boot is registered up front. Boot registers Preload, and Preload
// registers the remaining states once the shared assets are loaded.
//
//=========================================================================

//=== Module Declarations =================================================

mod boot;
mod credits;
mod game_menu;
mod game_over;
mod options;
mod preload;
mod the_game;

//=== Public API ==========================================================

pub use boot::Boot;
pub use credits::{parse_credits, CreditLine, Credits, DEFAULT_CREDITS};
pub use game_menu::GameMenu;
pub use game_over::GameOver;
pub use options::Options;
pub use preload::Preload;
pub use the_game::TheGame;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalSystems;
use crate::core::stage::{Align, Color, TextStyle};
use crate::core::state::StateId;
use crate::core::ui::MenuLayout;

//=== Asset Keys ==========================================================

pub const STARS: &str = "stars";
pub const LOADING: &str = "loading";
pub const BRAND: &str = "brand";
pub const SPLASH_SCRIPT: &str = "splash";
pub const POLYFILL_SCRIPT: &str = "polyfill";
pub const UTILS_SCRIPT: &str = "utils";

pub const MENU_BG: &str = "menu-bg";
pub const GAMEOVER_BG: &str = "gameover-bg";
pub const CREDITS_SCRIPT: &str = "credits";

/// Looping menu music.
pub const MENU_MUSIC: &str = "dangerous";

/// Credits music, played once.
pub const CREDITS_MUSIC: &str = "exit";

/// One-shot effect played when a menu option is chosen.
pub const CLICK_SOUND: &str = "click";

/// Display font family, loaded by Preload.
pub const FONT: &str = "TheMinion";

//=== Styles ==============================================================

const HOVER_FILL: Color = Color::hex(0xFEFFD5);
const HOVER_STROKE: Color = Color::rgba(200, 200, 200, 128);
const TITLE_FILL: Color = Color::hex(0xFDFFB5);

/// Menu entry in its resting state.
pub fn navitem_default(size: f32) -> TextStyle {
    TextStyle::new(FONT, size).stroke(Color::TRANSPARENT, 4.0)
}

/// Menu entry under the pointer.
pub fn navitem_hover(size: f32) -> TextStyle {
    TextStyle::new(FONT, size).fill(HOVER_FILL).stroke(HOVER_STROKE, 4.0)
}

pub fn title_style() -> TextStyle {
    TextStyle::new(FONT, 60.0).bold().fill(TITLE_FILL).align(Align::Center)
}

fn menu_layout(x: f32, base_y: f32, size: f32) -> MenuLayout {
    MenuLayout {
        x,
        base_y,
        row_height: 80.0,
        style: navitem_default(size),
        hover_style: navitem_hover(size),
        click_sound: Some(CLICK_SOUND.to_owned()),
    }
}

//=== Installation ========================================================

/// Registers Boot as the initial state.
pub fn install(systems: &mut GlobalSystems) {
    systems.state_machine.register_initial(StateId::Boot, Boot);
}

//=========================================================================
// Scenario Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::input::KeyCode;
    use crate::testing::Harness;

    #[test]
    fn full_tour_of_the_states() {
        let mut game = Harness::to_menu();

        game.click_text("Options");
        assert_eq!(game.active(), Some(StateId::Options));
        game.press(KeyCode::Escape);
        assert_eq!(game.active(), Some(StateId::GameMenu));

        game.click_text("Credits");
        assert_eq!(game.active(), Some(StateId::Credits));
        game.click_text("<- Back");
        assert_eq!(game.active(), Some(StateId::GameMenu));

        game.click_text("Start");
        assert_eq!(game.active(), Some(StateId::TheGame));
        game.press(KeyCode::Escape);
        assert_eq!(game.active(), Some(StateId::GameOver));

        game.click_text("Main menu");
        assert_eq!(game.active(), Some(StateId::GameMenu));
    }

    #[test]
    fn menu_music_survives_options_round_trip() {
        let mut game = Harness::to_menu();
        assert_eq!(game.playing_music(), [MENU_MUSIC]);

        game.click_text("Options");
        game.click_text("<- Back");

        // Started once, never restarted.
        let starts = game.audio.history().iter().filter(|k| *k == MENU_MUSIC).count();
        assert_eq!(starts, 1);
        assert_eq!(game.playing_music(), [MENU_MUSIC]);
    }

    #[test]
    fn credits_then_menu_swaps_tracks() {
        let mut game = Harness::to_menu();

        game.click_text("Credits");
        assert_eq!(game.playing_music(), [CREDITS_MUSIC]);

        game.press(KeyCode::Escape);
        assert_eq!(game.active(), Some(StateId::GameMenu));
        assert_eq!(game.playing_music(), [MENU_MUSIC]);
    }

    #[test]
    fn muted_music_stays_silent_everywhere() {
        let mut game = Harness::to_menu();
        game.click_text("Options");
        game.click_text("Music: On");
        assert!(game.playing_music().is_empty());

        game.click_text("<- Back");
        game.click_text("Credits");
        game.run_for(Duration::from_secs(1));

        assert!(game.playing_music().is_empty());
        assert_eq!(game.ctx.runtime.current_track_name(), None);
    }

    #[test]
    fn menu_choices_click_until_sound_is_off() {
        let mut game = Harness::to_menu();
        game.click_text("Options");
        assert_eq!(game.audio.history(), [MENU_MUSIC, CLICK_SOUND]);

        game.click_text("Sound: On");
        game.click_text("<- Back");
        game.click_text("Credits");

        let clicks = game.audio.history().iter().filter(|k| *k == CLICK_SOUND).count();
        assert_eq!(clicks, 2);
        assert_eq!(game.audio.playing_keys(), [CREDITS_MUSIC]);
    }

    #[test]
    fn nothing_from_a_previous_state_survives_a_transition() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");
        assert!(!game.ctx.tweens.is_empty());

        game.press(KeyCode::Escape);

        assert!(game.find_text("Kevin Macleod").is_none());
        assert!(game.ctx.tweens.is_empty());
        assert_eq!(game.ctx.widgets.len(), 3);
    }
}
