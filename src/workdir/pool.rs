//! Pooled work directories for test runs
//!
//! The pool owns a root directory containing integer-named subdirectories
//! (`0`, `1`, ...). Each [`WorkdirPool::acquire`] hands out the
//! lowest-numbered directory that is not currently held by a live
//! [`Workdir`] handle, so the on-disk footprint is bounded by peak
//! concurrent usage rather than cumulative usage.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::fs;
use tracing::{debug, warn};

use super::error::{Result, WorkdirError};

/// Directory name appended to the OS temp location for the default root.
pub const DEFAULT_POOL_DIR: &str = "harness-fs";

/// Hands out unique work directories under a shared root.
///
/// The root is injected at construction and fixed for the lifetime of the
/// pool; test harnesses get isolation by constructing a pool over their own
/// root rather than mutating shared state. Changing roots never affects
/// handles that are already live.
#[derive(Debug, Clone)]
pub struct WorkdirPool {
    root: PathBuf,
    in_use: Arc<Mutex<BTreeSet<u64>>>,
}

impl Default for WorkdirPool {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_POOL_DIR))
    }
}

impl WorkdirPool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            in_use: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Allocates a work directory, reusing the lowest-numbered free slot.
    ///
    /// Existing subdirectories that no handle currently holds (for example
    /// leftovers from an earlier process) are reused before a new
    /// integer-named directory is created. Callers are expected to serialize
    /// acquisitions; the directory listing is re-read on every call.
    pub async fn acquire(&self) -> Result<Workdir> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| WorkdirError::RootUnavailable {
                root: self.root.clone(),
                source,
            })?;

        let existing = self.scan_ids().await?;
        let id = {
            let mut in_use = self.in_use.lock().unwrap_or_else(PoisonError::into_inner);
            let id = existing
                .iter()
                .copied()
                .find(|id| !in_use.contains(id))
                .unwrap_or_else(|| next_free_id(&in_use));
            in_use.insert(id);
            id
        };

        let path = self.root.join(id.to_string());
        if existing.contains(&id) {
            debug!(id, path = %path.display(), "reusing existing work directory");
        }
        if let Err(source) = fs::create_dir_all(&path).await {
            self.release(id);
            return Err(source.into());
        }

        Ok(Workdir {
            id,
            path,
            in_use: Arc::clone(&self.in_use),
        })
    }

    /// Integer-named subdirectories currently present under the root.
    async fn scan_ids(&self) -> Result<BTreeSet<u64>> {
        let mut ids = BTreeSet::new();
        let mut entries =
            fs::read_dir(&self.root)
                .await
                .map_err(|source| WorkdirError::RootUnavailable {
                    root: self.root.clone(),
                    source,
                })?;
        while let Some(entry) = entries.next_entry().await? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(|n| n.parse().ok()) {
                ids.insert(id);
            }
        }
        Ok(ids)
    }

    fn release(&self, id: u64) {
        self.in_use
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

fn next_free_id(in_use: &BTreeSet<u64>) -> u64 {
    let mut id = 0;
    while in_use.contains(&id) {
        id += 1;
    }
    id
}

/// A live handle to one pooled work directory.
///
/// Disposal consumes the handle; the slot becomes eligible for reuse by a
/// later [`WorkdirPool::acquire`] once removal completes.
#[derive(Debug)]
pub struct Workdir {
    id: u64,
    path: PathBuf,
    in_use: Arc<Mutex<BTreeSet<u64>>>,
}

impl Workdir {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory from disk and frees its slot.
    ///
    /// A directory that no longer exists is treated as already disposed.
    pub async fn dispose(self) -> Result<()> {
        match fs::remove_dir_all(&self.path).await {
            Ok(()) => {}
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "work directory already removed");
            }
            Err(source) => {
                warn!(path = %self.path.display(), %source, "failed to remove work directory");
                return Err(WorkdirError::RemovalFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        }
        self.free_slot();
        Ok(())
    }

    /// Blocking variant of [`dispose`](Self::dispose) for process-exit
    /// cleanup paths where async completion cannot be awaited.
    pub fn dispose_sync(self) -> Result<()> {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "work directory already removed");
            }
            Err(source) => {
                return Err(WorkdirError::RemovalFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        }
        self.free_slot();
        Ok(())
    }

    fn free_slot(&self) {
        self.in_use
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
