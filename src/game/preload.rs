//=========================================================================
// Preload
//=========================================================================
//
// Loading screen for everything the menus need.
//
// Draws the splash art Boot loaded, declares the shared assets and tracks
// their progress on a loading bar. Once loaded, registers the remaining
// states and moves on to the menu after a short pause. The display font
// is not waited for; text uses the fallback family until it arrives.
//
//=========================================================================

use std::time::Duration;

use log::info;

use super::{
    Credits, GameMenu, GameOver, Options, TheGame, BRAND, CLICK_SOUND, CREDITS_MUSIC, CREDITS_SCRIPT, FONT,
    GAMEOVER_BG, LOADING, MENU_BG, MENU_MUSIC, STARS,
};
use crate::core::assets::{AssetEntry, AssetKind, LoadProgress};
use crate::core::globals::GlobalContext;
use crate::core::stage::{Align, Easing, ObjectId, Property, TextStyle, FALLBACK_FAMILY};
use crate::core::state::{GameState, StateId};

//=== Layout ==============================================================

const LOGO_Y: f32 = 100.0;
const LOGO_OFFSET_X: f32 = 120.0;
const LOGO_SCALE: f32 = 0.5;
const LOGO_FADE: Duration = Duration::from_millis(500);

const BAR_WIDTH: f32 = 387.0;
const BAR_Y: f32 = 400.0;
const STATUS_Y: f32 = 380.0;

/// Pause on "Ready!" before the menu starts.
const READY_DELAY: Duration = Duration::from_millis(100);

//=== Preload =============================================================

#[derive(Default)]
pub struct Preload {
    bar: Option<ObjectId>,
    status: Option<ObjectId>,
}

impl Preload {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_status(&self, ctx: &mut GlobalContext, text: &str) {
        if let Some(status) = self.status {
            ctx.stage.set_text(status, text);
        }
    }
}

impl GameState for Preload {
    fn preload(&mut self, ctx: &mut GlobalContext) {
        let center_x = ctx.stage.center_x();

        ctx.stage.add_sprite(0.0, 0.0, STARS);

        let logo = ctx.stage.add_sprite(center_x - LOGO_OFFSET_X, LOGO_Y, BRAND);
        if let Some(object) = ctx.stage.get_mut(logo) {
            object.scale = (LOGO_SCALE, LOGO_SCALE);
            object.alpha = 0.0;
        }
        ctx.tweens
            .to(logo, Property::Alpha, 1.0, LOGO_FADE, Easing::Linear, Duration::ZERO);

        // The bar grows from the left as entries complete.
        let bar = ctx.stage.add_sprite(center_x - BAR_WIDTH / 2.0, BAR_Y, LOADING);
        ctx.stage.set_property(bar, Property::ScaleX, 0.0);
        self.bar = Some(bar);

        let status = ctx.stage.add_text(
            center_x,
            STATUS_Y,
            "Loading...",
            TextStyle::new(FALLBACK_FAMILY, 24.0).align(Align::Center),
        );
        if let Some(object) = ctx.stage.get_mut(status) {
            object.anchor = (0.5, 0.5);
        }
        self.status = Some(status);

        ctx.load
            .image(MENU_BG, "images/menu-bg.jpg")
            .image(GAMEOVER_BG, "images/gameover-bg.jpg")
            .audio(MENU_MUSIC, "audio/dangerous.ogg")
            .audio(CREDITS_MUSIC, "audio/exit.ogg")
            .audio(CLICK_SOUND, "audio/click.ogg")
            .declare(AssetEntry::new(AssetKind::Script, CREDITS_SCRIPT, "scripts/credits.txt").optional(true))
            .font(FONT, "fonts/theminion.ttf");
    }

    fn load_progress(&mut self, ctx: &mut GlobalContext, progress: LoadProgress) {
        if let Some(bar) = self.bar {
            ctx.stage.set_property(bar, Property::ScaleX, progress.fraction());
        }
        self.set_status(ctx, &format!("Loading... {}%", progress.percent()));
    }

    fn create(&mut self, ctx: &mut GlobalContext) {
        self.set_status(ctx, "Ready!");
        info!(target: "state", "Shared assets ready");

        ctx.transitions.register(StateId::GameMenu, Box::new(GameMenu::new()));
        ctx.transitions.register(StateId::TheGame, Box::new(TheGame::new()));
        ctx.transitions.register(StateId::Options, Box::new(Options::new()));
        ctx.transitions.register(StateId::Credits, Box::new(Credits::new()));
        ctx.transitions.register(StateId::GameOver, Box::new(GameOver::new()));

        ctx.scheduled.schedule(StateId::GameMenu, READY_DELAY);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
