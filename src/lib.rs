//=========================================================================
// Arcade Shell
//=========================================================================
//
// State machine and menu shell of a small arcade game.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the state, asset, audio, stage and widget building blocks
//   under `core`
// - Ship the game's own states under `game`
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use arcade_shell::{game, EngineBuilder};
//
// EngineBuilder::new().build().init(game::install).run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod config;
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

#[cfg(test)]
mod testing;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
