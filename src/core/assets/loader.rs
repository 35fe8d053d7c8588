//=========================================================================
// Asset Loader
//=========================================================================
//
// Asynchronous loading collaborator.
//
// Architecture:
//   StateMachine ──start(batch)──> AssetLoader ──worker thread──┐
//        ↑                                                      │
//        └────────────── poll() ← crossbeam channel ← LoadEvent ┘
//
// The state machine polls once per tick and only calls `create` after
// every entry in the batch has reported back.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::manifest::AssetEntry;
use crate::core::error::AssetLoadError;

//=== Types ===============================================================

/// Identifies one `start` call; events from older batches are stale.
pub type BatchId = u64;

/// Completion report for one entry.
#[derive(Debug, Clone)]
pub struct LoadEvent {
    pub batch: BatchId,
    pub entry: AssetEntry,
    pub outcome: Result<Vec<u8>, AssetLoadError>,
}

//=== AssetLoader Trait ===================================================

/// Loads batches of manifest entries off the logic thread.
///
/// Implementations must eventually report every entry of a started batch
/// exactly once (success or failure) unless the batch is cancelled.
pub trait AssetLoader: Send {
    /// Begins loading `entries` as batch `batch`.
    fn start(&mut self, batch: BatchId, entries: Vec<AssetEntry>);

    /// Returns completion events received since the last poll.
    fn poll(&mut self) -> Vec<LoadEvent>;

    /// Stops work on a batch. Already-sent events may still arrive.
    fn cancel(&mut self, _batch: BatchId) {}
}

//=== FileLoader ==========================================================

/// Reads assets from a directory on a worker thread per batch.
pub struct FileLoader {
    root: PathBuf,
    sender: Sender<LoadEvent>,
    receiver: Receiver<LoadEvent>,
    cancel_flags: HashMap<BatchId, Arc<AtomicBool>>,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            root: root.into(),
            sender,
            receiver,
            cancel_flags: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLoader for FileLoader {
    fn start(&mut self, batch: BatchId, entries: Vec<AssetEntry>) {
        // Drop flags of batches whose workers have finished.
        self.cancel_flags.retain(|_, flag| Arc::strong_count(flag) > 1);

        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancel_flags.insert(batch, Arc::clone(&cancelled));

        let sender = self.sender.clone();
        let root = self.root.clone();

        debug!(target: "assets", "Batch {} started ({} entries)", batch, entries.len());

        thread::spawn(move || {
            for entry in entries {
                if cancelled.load(Ordering::Relaxed) {
                    debug!(target: "assets", "Batch {} cancelled", batch);
                    return;
                }
                let outcome = read_asset(&root, &entry);
                if sender.send(LoadEvent { batch, entry, outcome }).is_err() {
                    return;
                }
            }
        });
    }

    fn poll(&mut self) -> Vec<LoadEvent> {
        self.receiver.try_iter().collect()
    }

    fn cancel(&mut self, batch: BatchId) {
        if let Some(flag) = self.cancel_flags.remove(&batch) {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

//--- Internal Helpers ----------------------------------------------------

fn read_asset(root: &Path, entry: &AssetEntry) -> Result<Vec<u8>, AssetLoadError> {
    let path = root.join(&entry.path);
    let display = path.display().to_string();

    match fs::read(&path) {
        Ok(bytes) if bytes.is_empty() => Err(AssetLoadError::Empty {
            key: entry.key.clone(),
            path: display,
        }),
        Ok(bytes) => {
            trace!(target: "assets", "Read {} bytes for {} `{}`", bytes.len(), entry.kind, entry.key);
            Ok(bytes)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetLoadError::NotFound {
            key: entry.key.clone(),
            path: display,
        }),
        Err(e) => Err(AssetLoadError::Io {
            key: entry.key.clone(),
            path: display,
            reason: e.to_string(),
        }),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
