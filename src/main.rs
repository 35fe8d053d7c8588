//=========================================================================
// Arcade Shell (binary)
//=========================================================================
//
// Usage: arcade_shell [CONFIG]
//
// Reads CONFIG (default `arcade.toml`); a missing file means defaults.
// Log output is controlled through RUST_LOG (default `info`).
//
//=========================================================================

use std::process;

use log::{error, info};

use arcade_shell::config::GameConfig;
use arcade_shell::{game, EngineBuilder};

const DEFAULT_CONFIG: &str = "arcade.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let config = match GameConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(e) if e.is_not_found() => {
            info!("No config at {}, using defaults", path);
            GameConfig::default()
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    EngineBuilder::new()
        .with_config(config)
        .build()
        .init(game::install)
        .run();
}
