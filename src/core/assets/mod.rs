//=========================================================================
// Assets
//=========================================================================
//
// Declaration, asynchronous loading and caching of state assets.
//
// Architecture:
//   GameState::preload → AssetManifest (ctx.load)
//     → AssetLoader::start (worker) → LoadEvent → AssetCache
//
//=========================================================================

//=== Module Declarations =================================================

mod cache;
mod loader;
mod manifest;

//=== Public API ==========================================================

pub use cache::AssetCache;
pub use loader::{AssetLoader, BatchId, FileLoader, LoadEvent};
pub use manifest::{AssetEntry, AssetKind, AssetManifest, LoadProgress};

pub(crate) use manifest::LoadTracker;
