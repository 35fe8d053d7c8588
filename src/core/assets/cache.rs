//=========================================================================
// Asset Cache
//=========================================================================
//
// Loaded asset bytes, addressable by kind + key for the process lifetime.
//
//=========================================================================

use std::collections::HashMap;

use super::manifest::{AssetEntry, AssetKind};

/// Successfully loaded assets.
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<(AssetKind, String), Vec<u8>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, entry: &AssetEntry, bytes: Vec<u8>) {
        self.entries.insert((entry.kind, entry.key.clone()), bytes);
    }

    pub fn get(&self, kind: AssetKind, key: &str) -> Option<&[u8]> {
        self.entries
            .get(&(kind, key.to_owned()))
            .map(Vec::as_slice)
    }

    /// Loaded text asset (scripts), if present and valid UTF-8.
    pub fn text(&self, kind: AssetKind, key: &str) -> Option<&str> {
        self.get(kind, key).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn contains(&self, kind: AssetKind, key: &str) -> bool {
        self.entries.contains_key(&(kind, key.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
