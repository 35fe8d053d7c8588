//=========================================================================
// Boot
//=========================================================================
//
// Loads what the loading screen itself needs, plus the bootstrap scripts,
// then hands over to Preload. Every asset here is required.
//
//=========================================================================

use log::debug;

use super::{Preload, BRAND, LOADING, POLYFILL_SCRIPT, SPLASH_SCRIPT, STARS, UTILS_SCRIPT};
use crate::core::assets::AssetKind;
use crate::core::globals::GlobalContext;
use crate::core::state::{GameState, StateId};

pub struct Boot;

impl GameState for Boot {
    fn preload(&mut self, ctx: &mut GlobalContext) {
        ctx.load
            .image(STARS, "images/stars.jpg")
            .image(LOADING, "images/loading.png")
            .image(BRAND, "images/logo.png")
            .script(SPLASH_SCRIPT, "scripts/splash.txt")
            .script(POLYFILL_SCRIPT, "scripts/polyfill.txt")
            .script(UTILS_SCRIPT, "scripts/utils.txt");
    }

    fn create(&mut self, ctx: &mut GlobalContext) {
        for key in [SPLASH_SCRIPT, POLYFILL_SCRIPT, UTILS_SCRIPT] {
            if let Some(script) = ctx.assets.text(AssetKind::Script, key) {
                debug!(target: "state", "Bootstrap script `{}` loaded ({} lines)", key, script.lines().count());
            }
        }
        ctx.transitions.register(StateId::Preload, Box::new(Preload::new()));
        ctx.transitions.start(StateId::Preload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{AssetLoadError, RuntimeError};
    use crate::testing::{Harness, TICK};

    #[test]
    fn requests_splash_assets() {
        let game = Harness::game();
        assert_eq!(game.active(), Some(StateId::Boot));
        assert_eq!(
            game.loader.requested_keys(),
            [STARS, LOADING, BRAND, SPLASH_SCRIPT, POLYFILL_SCRIPT, UTILS_SCRIPT]
        );
    }

    #[test]
    fn hands_over_to_preload() {
        let mut game = Harness::game();
        game.finish_loading();

        assert_eq!(game.active(), Some(StateId::Preload));
        assert!(game.systems.state_machine.is_registered(StateId::Preload));
    }

    #[test]
    fn bootstrap_scripts_gate_the_handover() {
        let mut game = Harness::game();
        for key in [STARS, LOADING, BRAND, SPLASH_SCRIPT, POLYFILL_SCRIPT] {
            game.loader.complete(key);
        }
        game.tick();
        assert_eq!(game.active(), Some(StateId::Boot));

        game.loader.complete(UTILS_SCRIPT);
        game.tick();
        assert_eq!(game.active(), Some(StateId::Preload));
        assert!(game.ctx.assets.contains(AssetKind::Script, UTILS_SCRIPT));
    }

    #[test]
    fn missing_utility_script_is_fatal() {
        let mut game = Harness::game();
        game.loader.fail(UTILS_SCRIPT);

        let err = game.systems.update(&mut game.ctx, TICK).unwrap_err();

        assert!(matches!(err, RuntimeError::AssetLoad(AssetLoadError::NotFound { ref key, .. }) if key == UTILS_SCRIPT));
        assert!(!game.systems.state_machine.is_registered(StateId::Preload));
    }

    #[test]
    fn missing_splash_image_is_fatal() {
        let mut game = Harness::game();
        game.loader.complete(STARS);
        game.loader.fail(BRAND);

        let err = game.systems.update(&mut game.ctx, TICK).unwrap_err();

        assert!(matches!(err, RuntimeError::AssetLoad(AssetLoadError::NotFound { ref key, .. }) if key == BRAND));
        assert_eq!(game.active(), Some(StateId::Boot));
        assert!(!game.systems.state_machine.is_registered(StateId::Preload));
    }
}
