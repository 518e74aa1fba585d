//! Panel registry: which live views show which document.
//!
//! Two maps are kept in step under one lock:
//! - `DocumentPath -> ViewGroup` (views in open order)
//! - `ViewId -> (DocumentPath, DocumentUri)` for O(1) reverse lookup
//!
//! A view belongs to at most one group, and a path with no views has no
//! entry. The registry is an explicitly constructed value; clones share the
//! same state, so the broadcaster and coordinator can each hold one.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{SyncError, SyncResult};
use crate::id::{DocumentPath, DocumentUri, ViewId};

/// Views registered under one path, first-opened first.
pub type ViewGroup = SmallVec<[ViewId; 4]>;

#[derive(Debug, Clone)]
struct ViewEntry {
    path: DocumentPath,
    uri: DocumentUri,
}

#[derive(Debug, Default)]
struct RegistryState {
    groups: FxHashMap<DocumentPath, ViewGroup>,
    views: FxHashMap<ViewId, ViewEntry>,
}

impl RegistryState {
    /// Remove `view` from both maps, dropping its group if it empties.
    fn detach(&mut self, view: ViewId) -> Option<DocumentPath> {
        let entry = self.views.remove(&view)?;
        if let Some(group) = self.groups.get_mut(&entry.path) {
            group.retain(|member| *member != view);
            if group.is_empty() {
                self.groups.remove(&entry.path);
            }
        }
        Some(entry.path)
    }
}

/// The two views a diff compares, captured in a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPair {
    pub path: DocumentPath,
    pub left: ViewId,
    pub left_uri: DocumentUri,
    pub right: ViewId,
    pub right_uri: DocumentUri,
}

/// Thread-safe registry of live views.
///
/// Uses `parking_lot::RwLock`; no lock is ever held across an await.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    inner: Arc<RwLock<RegistryState>>,
}

impl PanelRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `view` to the group for `path` and remember its URI.
    ///
    /// Returns the group size after insertion. A view that is already
    /// registered is detached first, so it never sits in two groups.
    pub fn register_view(&self, path: DocumentPath, view: ViewId, uri: DocumentUri) -> usize {
        let mut state = self.inner.write();
        if let Some(previous) = state.detach(view) {
            tracing::warn!(view = %view, previous = %previous, "docsync.registry.reregister");
        }
        let group = state.groups.entry(path.clone()).or_default();
        group.push(view);
        let len = group.len();
        tracing::trace!(view = %view, path = %path, uri = %uri, members = len, "docsync.registry.register");
        state.views.insert(view, ViewEntry { path, uri });
        len
    }

    /// Remove `view` from its group and forget its URI.
    ///
    /// Returns the path it was registered under; unknown views are a no-op.
    pub fn unregister_view(&self, view: ViewId) -> Option<DocumentPath> {
        let path = self.inner.write().detach(view)?;
        tracing::trace!(view = %view, path = %path, "docsync.registry.unregister");
        Some(path)
    }

    /// Sibling group containing `view` (including `view` itself).
    pub fn group_for(&self, view: ViewId) -> Option<ViewGroup> {
        let state = self.inner.read();
        let entry = state.views.get(&view)?;
        state.groups.get(&entry.path).cloned()
    }

    /// Group registered under `path`.
    pub fn group_of(&self, path: &DocumentPath) -> Option<ViewGroup> {
        self.inner.read().groups.get(path).cloned()
    }

    /// URI `view` was opened with.
    pub fn uri_for(&self, view: ViewId) -> Option<DocumentUri> {
        self.inner.read().views.get(&view).map(|entry| entry.uri.clone())
    }

    /// Sibling key `view` is registered under.
    pub fn path_for(&self, view: ViewId) -> Option<DocumentPath> {
        self.inner.read().views.get(&view).map(|entry| entry.path.clone())
    }

    /// Check if `view` is registered.
    pub fn contains(&self, view: ViewId) -> bool {
        self.inner.read().views.contains_key(&view)
    }

    /// Check that `view` is still registered under `path`.
    pub fn is_member(&self, path: &DocumentPath, view: ViewId) -> bool {
        self.inner
            .read()
            .views
            .get(&view)
            .is_some_and(|entry| entry.path == *path)
    }

    /// Snapshot the first two views of `path` with their URIs.
    ///
    /// `Ok(None)` when fewer than two views are open.
    pub fn pair_for(&self, path: &DocumentPath) -> SyncResult<Option<DiffPair>> {
        let state = self.inner.read();
        let Some(group) = state.groups.get(path) else {
            return Ok(None);
        };
        let (left, right) = match group.as_slice() {
            [left, right, ..] => (*left, *right),
            _ => return Ok(None),
        };
        let uri = |view: ViewId| {
            state
                .views
                .get(&view)
                .map(|entry| entry.uri.clone())
                .ok_or(SyncError::MissingUri(view))
        };
        Ok(Some(DiffPair {
            path: path.clone(),
            left,
            left_uri: uri(left)?,
            right,
            right_uri: uri(right)?,
        }))
    }

    /// Number of paths with at least one open view.
    pub fn path_count(&self) -> usize {
        self.inner.read().groups.len()
    }

    /// Number of registered views.
    pub fn view_count(&self) -> usize {
        self.inner.read().views.len()
    }

    /// Check if no views are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().views.is_empty()
    }
}
