//=========================================================================
// Asset Manifest
//=========================================================================
//
// Declarative list of what a state needs before it can render.
//
// States fill the manifest from `GameState::preload` via `ctx.load`; the
// state machine hands it to the loader and tracks completion.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;

//=== AssetKind ===========================================================

/// Category an asset key lives in. Keys are unique per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
    Script,
    Font,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Script => "script",
            Self::Font => "font",
        };
        f.write_str(name)
    }
}

//=== AssetEntry ==========================================================

/// One declared asset.
///
/// `optional` entries may fail without blocking the owning state: fonts
/// are optional by default so text falls back to a generic family.
/// Optional fonts also load in the background, see
/// [`is_background`](Self::is_background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub key: String,
    pub path: PathBuf,
    pub optional: bool,
}

impl AssetEntry {
    pub fn new(kind: AssetKind, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            key: key.into(),
            path: path.into(),
            optional: kind == AssetKind::Font,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Background entries never hold up `create`; they are stored whenever
    /// they arrive.
    pub fn is_background(&self) -> bool {
        self.kind == AssetKind::Font && self.optional
    }

    /// Identity used for de-duplication and caching.
    pub fn id(&self) -> (AssetKind, &str) {
        (self.kind, self.key.as_str())
    }
}

//=== AssetManifest =======================================================

/// Ordered, de-duplicated asset declarations.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    entries: Vec<AssetEntry>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Declaration ------------------------------------------------------

    /// Declares an asset. A second declaration of the same kind and key
    /// replaces the first.
    pub fn declare(&mut self, entry: AssetEntry) -> &mut Self {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id() == entry.id()) {
            warn!(
                target: "assets",
                "{} `{}` declared twice, keeping {}",
                entry.kind,
                entry.key,
                entry.path.display()
            );
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        self
    }

    pub fn image(&mut self, key: &str, path: impl AsRef<Path>) -> &mut Self {
        self.declare(AssetEntry::new(AssetKind::Image, key, path.as_ref()))
    }

    pub fn audio(&mut self, key: &str, path: impl AsRef<Path>) -> &mut Self {
        self.declare(AssetEntry::new(AssetKind::Audio, key, path.as_ref()))
    }

    pub fn script(&mut self, key: &str, path: impl AsRef<Path>) -> &mut Self {
        self.declare(AssetEntry::new(AssetKind::Script, key, path.as_ref()))
    }

    /// Declares a font. The family name is the key.
    pub fn font(&mut self, family: &str, path: impl AsRef<Path>) -> &mut Self {
        self.declare(AssetEntry::new(AssetKind::Font, family, path.as_ref()))
    }

    //--- Access -----------------------------------------------------------

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Takes all declarations, leaving the manifest empty.
    pub fn take(&mut self) -> Vec<AssetEntry> {
        std::mem::take(&mut self.entries)
    }
}

//=== LoadProgress ========================================================

/// Snapshot of a batch's progress, delivered after every completed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub completed: usize,
    pub total: usize,
}

impl LoadProgress {
    /// Completed fraction in `[0, 1]`; an empty batch counts as done.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

//=== LoadTracker =========================================================

/// Tracks which entries of an in-flight batch are still outstanding.
#[derive(Debug, Clone)]
pub(crate) struct LoadTracker {
    pending: HashSet<(AssetKind, String)>,
    total: usize,
    failed_optional: usize,
}

impl LoadTracker {
    pub(crate) fn new(entries: &[AssetEntry]) -> Self {
        let pending: HashSet<_> = entries.iter().map(|e| (e.kind, e.key.clone())).collect();
        Self {
            total: pending.len(),
            pending,
            failed_optional: 0,
        }
    }

    /// Marks an entry finished. Returns `false` for entries not in the batch
    /// or already finished.
    pub(crate) fn finish(&mut self, entry: &AssetEntry, failed: bool) -> bool {
        let removed = self.pending.remove(&(entry.kind, entry.key.clone()));
        if removed && failed {
            self.failed_optional += 1;
        }
        removed
    }

    pub(crate) fn progress(&self) -> LoadProgress {
        LoadProgress {
            completed: self.total - self.pending.len(),
            total: self.total,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn failed_optional(&self) -> usize {
        self.failed_optional
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
