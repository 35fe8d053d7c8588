//=========================================================================
// Credits
//=========================================================================
//
// Scrolling credits over the game-over art.
//
// Lines come from the `credits` script when it loaded, one `task|author`
// pair per line; otherwise the built-in list is used. Each line starts
// below the screen and scrolls up, ten seconds after the previous one.
//
//=========================================================================

use std::time::Duration;

use log::{debug, warn};

use super::{menu_layout, CREDITS_MUSIC, CREDITS_SCRIPT, FONT, GAMEOVER_BG};
use crate::core::assets::AssetKind;
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::stage::{Align, Easing, ObjectId, Property, TextStyle};
use crate::core::state::{GameState, StateId};
use crate::core::ui::MenuBuilder;

//=== Credit Lines ========================================================

/// `(task, author)` pairs shown when no script is available.
pub const DEFAULT_CREDITS: &[(&str, &str)] = &[
    ("Music", "Kevin Macleod"),
    ("Developer", "Matt McFarland"),
    ("Lorem Ipsum", "Mipsem Dempsum"),
    ("Caveats", "Keyboard Cat"),
    ("Rust", "Powered By"),
    ("for playing", "Thank you"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditLine {
    pub task: String,
    pub author: String,
}

impl CreditLine {
    pub fn new(task: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            author: author.into(),
        }
    }
}

/// Parses `task|author` lines. Blank lines and `#` comments are skipped,
/// as are lines without a separator.
pub fn parse_credits(script: &str) -> Vec<CreditLine> {
    script
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match line.split_once('|') {
                Some((task, author)) => Some(CreditLine::new(task.trim(), author.trim())),
                None => {
                    warn!(target: "state", "Credits line {} has no `|`: {:?}", index + 1, line);
                    None
                }
            }
        })
        .collect()
}

fn default_credits() -> Vec<CreditLine> {
    DEFAULT_CREDITS
        .iter()
        .map(|(task, author)| CreditLine::new(*task, *author))
        .collect()
}

//=== Layout ==============================================================

const AUTHOR_START_Y: f32 = 900.0;
const TASK_START_Y: f32 = 950.0;
const AUTHOR_END_Y: f32 = -300.0;
const TASK_END_Y: f32 = -200.0;

const SCROLL: Duration = Duration::from_secs(20);
const STAGGER: Duration = Duration::from_secs(10);

const BACKGROUND_FADE: Duration = Duration::from_secs(20);
const BACKGROUND_FADE_DELAY: Duration = Duration::from_secs(40);

//=== Credits =============================================================

#[derive(Default)]
pub struct Credits {
    shown: usize,
}

impl Credits {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_credit(&mut self, ctx: &mut GlobalContext, credit: &CreditLine) {
        let x = ctx.stage.center_x();
        let author = centered_text(ctx, x, AUTHOR_START_Y, &credit.author, 40.0);
        let task = centered_text(ctx, x, TASK_START_Y, &credit.task, 30.0);

        let delay = STAGGER * self.shown as u32;
        ctx.tweens.to(author, Property::Y, AUTHOR_END_Y, SCROLL, Easing::CubicOut, delay);
        ctx.tweens.to(task, Property::Y, TASK_END_Y, SCROLL, Easing::CubicOut, delay);

        self.shown += 1;
    }
}

fn centered_text(ctx: &mut GlobalContext, x: f32, y: f32, content: &str, size: f32) -> ObjectId {
    let style = TextStyle::new(FONT, size).align(Align::Center);
    let id = ctx.stage.add_text(x, y, content, style);
    if let Some(object) = ctx.stage.get_mut(id) {
        object.anchor = (0.5, 0.5);
    }
    id
}

impl GameState for Credits {
    fn create(&mut self, ctx: &mut GlobalContext) {
        ctx.runtime.switch_music(CREDITS_MUSIC, false);

        let background = ctx.stage.add_sprite(0.0, 0.0, GAMEOVER_BG);

        let mut credits = ctx
            .assets
            .text(AssetKind::Script, CREDITS_SCRIPT)
            .map(parse_credits)
            .unwrap_or_default();
        if credits.is_empty() {
            debug!(target: "state", "No credits script, using built-in list");
            credits = default_credits();
        }

        self.shown = 0;
        for credit in &credits {
            self.add_credit(ctx, credit);
        }

        let mut menu = MenuBuilder::new(menu_layout(10.0, 450.0, 30.0));
        menu.add_option(ctx, "<- Back", |w| w.states.start(StateId::GameMenu));

        ctx.tweens.to(
            background,
            Property::Alpha,
            0.0,
            BACKGROUND_FADE,
            Easing::CubicOut,
            BACKGROUND_FADE_DELAY,
        );
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn y_of(game: &Harness, text: &str) -> f32 {
        let id = game.find_text(text).unwrap();
        game.ctx.stage.get(id).unwrap().y
    }

    #[test]
    fn parses_pairs_and_skips_noise() {
        let script = "# credits\n\nArt | Jane Doe\nno separator here\nSound|  Sam\n";
        assert_eq!(
            parse_credits(script),
            [CreditLine::new("Art", "Jane Doe"), CreditLine::new("Sound", "Sam")]
        );
    }

    #[test]
    fn uses_builtin_list_without_script() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");

        for (task, author) in DEFAULT_CREDITS {
            assert_eq!(y_of(&game, author), AUTHOR_START_Y);
            assert_eq!(y_of(&game, task), TASK_START_Y);
        }
        assert_eq!(game.ctx.tweens.len(), DEFAULT_CREDITS.len() * 2 + 1);
    }

    #[test]
    fn script_lines_replace_builtin_list() {
        let mut game = Harness::game();
        game.loader.set_content(CREDITS_SCRIPT, "Art|Jane Doe\n");
        game.finish_loading();
        game.finish_loading();
        game.run_for(Duration::from_millis(120));
        game.click_text("Credits");

        assert!(game.find_text("Jane Doe").is_some());
        assert!(game.find_text("Kevin Macleod").is_none());
    }

    #[test]
    fn lines_scroll_one_after_another() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");
        game.run_for(SCROLL);

        assert_eq!(y_of(&game, "Kevin Macleod"), AUTHOR_END_Y);
        assert_eq!(y_of(&game, "Music"), TASK_END_Y);

        // Second line started ten seconds later and is still moving.
        let second = y_of(&game, "Matt McFarland");
        assert!(second < AUTHOR_START_Y && second > AUTHOR_END_Y);

        // Last line has not started yet.
        assert_eq!(y_of(&game, "Thank you"), AUTHOR_START_Y);
    }

    #[test]
    fn background_fades_after_delay() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");
        let background = game.ctx.stage.objects()[0].id;

        game.run_for(Duration::from_secs(39));
        assert_eq!(game.ctx.stage.property(background, Property::Alpha), Some(1.0));

        game.run_for(Duration::from_secs(22));
        assert_eq!(game.ctx.stage.property(background, Property::Alpha), Some(0.0));
    }

    #[test]
    fn back_option_sits_bottom_left() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");

        let back = game.find_text("<- Back").unwrap();
        let object = game.ctx.stage.get(back).unwrap();
        assert_eq!((object.x, object.y), (10.0, 530.0));
    }

    #[test]
    fn reentry_restarts_credits_track() {
        let mut game = Harness::to_menu();
        game.click_text("Credits");
        game.press(KeyCode::Escape);
        game.click_text("Credits");

        let starts = game.audio.history().iter().filter(|k| *k == CREDITS_MUSIC).count();
        assert_eq!(starts, 2);
        assert_eq!(game.playing_music(), [CREDITS_MUSIC]);
    }
}
