//! Owned document store with single-writer edits and change notification.
//!
//! Readers take a [`Snapshot`]: a revision number plus an `Arc` of the root.
//! Writers go through [`DocumentStore::edit`] or the replace operations, which
//! publish a new root and bump the revision under one lock, so two edits at
//! different paths cannot overwrite each other. Subscribers are notified after
//! the lock is released.

use crate::error::{EditError, EditResult};
use crate::mutate::{self, WriteMode};
use crate::path::Path;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub root: Arc<Value>,
}

/// What the editing layer needs from whoever owns the document.
pub trait DocumentStore {
    fn current(&self) -> Snapshot;

    /// Publish `root` unconditionally.
    fn replace_root(&self, root: Value) -> u64;

    /// Publish `root` only if the document is still at `expected`.
    fn compare_and_replace(&self, expected: u64, root: Value) -> EditResult<u64>;

    /// Replace the subtree at `path` against the latest root.
    fn edit(&self, path: &Path, new_value: Value, mode: WriteMode) -> EditResult<u64>;
}

type Observer = Arc<dyn Fn(&Snapshot) + Send + Sync>;

pub struct SharedDocument {
    inner: Mutex<Snapshot>,
    observers: Mutex<Vec<Observer>>,
}

impl SharedDocument {
    pub fn new(root: Value) -> Self {
        Self {
            inner: Mutex::new(Snapshot { revision: 0, root: Arc::new(root) }),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register a hook run after every publish, in registration order.
    ///
    /// Hooks run with no store lock held, so they may read, edit or subscribe.
    /// A hook added during a publish first fires on the next one.
    pub fn subscribe(&self, f: impl Fn(&Snapshot) + Send + Sync + 'static) {
        self.observers.lock().push(Arc::new(f));
    }

    fn publish(&self, guard: &mut Snapshot, root: Value) -> Snapshot {
        guard.revision += 1;
        guard.root = Arc::new(root);
        tracing::debug!(revision = guard.revision, "published new root");
        guard.clone()
    }

    fn notify(&self, snap: &Snapshot) {
        let hooks: Vec<Observer> = self.observers.lock().clone();
        for f in &hooks {
            f(snap);
        }
    }
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

impl std::fmt::Debug for SharedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDocument")
            .field("revision", &self.inner.lock().revision)
            .finish_non_exhaustive()
    }
}

impl DocumentStore for SharedDocument {
    fn current(&self) -> Snapshot {
        self.inner.lock().clone()
    }

    fn replace_root(&self, root: Value) -> u64 {
        let snap = {
            let mut guard = self.inner.lock();
            self.publish(&mut guard, root)
        };
        self.notify(&snap);
        snap.revision
    }

    fn compare_and_replace(&self, expected: u64, root: Value) -> EditResult<u64> {
        let snap = {
            let mut guard = self.inner.lock();
            if guard.revision != expected {
                return Err(EditError::StaleRevision { expected, actual: guard.revision });
            }
            self.publish(&mut guard, root)
        };
        self.notify(&snap);
        Ok(snap.revision)
    }

    fn edit(&self, path: &Path, new_value: Value, mode: WriteMode) -> EditResult<u64> {
        let snap = {
            let mut guard = self.inner.lock();
            mutate::check_write(&guard.root, path, mode)?;
            // Copy only if some reader still holds the old root.
            let old = std::mem::take(&mut guard.root);
            let mut working = Arc::try_unwrap(old).unwrap_or_else(|shared| (*shared).clone());
            if let Err(e) = mutate::try_apply_in_place(&mut working, path, new_value, mode) {
                guard.root = Arc::new(working);
                return Err(e);
            }
            self.publish(&mut guard, working)
        };
        self.notify(&snap);
        Ok(snap.revision)
    }
}
