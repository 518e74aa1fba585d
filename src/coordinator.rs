//! Diff coordination for sibling views.
//!
//! A trigger runs one pass and keeps nothing afterwards:
//!
//! ```text
//! registry snapshot (group[0], group[1])
//!       |
//!       v
//! render both URIs concurrently -> extract blocks -> LCS runs
//!       |
//!       v
//! remap runs to per-view indices -> highlight each view
//! ```
//!
//! Any failure before dispatch aborts the pass with a `warn` event and
//! nothing is sent. Views are re-checked against the registry right before
//! their message goes out, so a view that closed mid-diff is skipped.
//!
//! Triggers for the same path serialize their dispatch step, and a pass that
//! was overtaken by a newer trigger for its path drops its result instead of
//! overwriting fresher highlights.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::join;
use futures_util::lock::Mutex as AsyncMutex;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::algo::{DiffResult, LcsResult, LcsStats, diff_with_stats};
use crate::config::DiffConfig;
use crate::error::{SyncError, SyncResult};
use crate::extract::extract_blocks;
use crate::host::{DocumentRenderer, ViewHost};
use crate::id::{DocumentPath, DocumentUri, ViewId};
use crate::message::{HighlightSet, ViewMessage};
use crate::registry::{DiffPair, PanelRegistry};

/// What a trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Diffing is turned off in config
    Disabled,
    /// Fewer than two views are open for the path
    NotEnoughViews,
    /// Rendering, lookup or size check failed; nothing was sent
    Aborted,
    /// A newer trigger for the same path started first; nothing was sent
    Superseded,
    /// Highlights went out
    Dispatched(DispatchReport),
}

impl DiffOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Summary of a dispatched diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub left: ViewId,
    pub right: ViewId,
    pub stats: LcsStats,
    /// False when the left view closed mid-diff or its send failed
    pub left_delivered: bool,
    /// False when the right view closed mid-diff or its send failed
    pub right_delivered: bool,
}

#[derive(Default)]
struct PathSlot {
    generation: AtomicU64,
    dispatch: AsyncMutex<()>,
}

/// Computes and dispatches pairwise diffs.
pub struct DiffCoordinator<R, H> {
    registry: PanelRegistry,
    renderer: Arc<R>,
    host: Arc<H>,
    config: DiffConfig,
    slots: Mutex<FxHashMap<DocumentPath, Arc<PathSlot>>>,
}

impl<R: DocumentRenderer, H: ViewHost> DiffCoordinator<R, H> {
    pub fn new(registry: PanelRegistry, renderer: Arc<R>, host: Arc<H>, config: DiffConfig) -> Self {
        Self {
            registry,
            renderer,
            host,
            config,
            slots: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff the first two views of `path` and highlight both.
    ///
    /// Never fails: problems are logged and reported through the outcome.
    pub async fn maybe_trigger_diff(&self, path: &DocumentPath) -> DiffOutcome {
        if !self.config.enabled {
            return DiffOutcome::Disabled;
        }

        let pair = match self.registry.pair_for(path) {
            Ok(Some(pair)) => pair,
            Ok(None) => return DiffOutcome::NotEnoughViews,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "docsync.diff.aborted");
                return DiffOutcome::Aborted;
            }
        };

        let slot = self.slot(path);
        let ticket = slot.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let lcs = match self.compute(&pair).await {
            Ok(lcs) => lcs,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "docsync.diff.aborted");
                return DiffOutcome::Aborted;
            }
        };

        let _dispatching = slot.dispatch.lock().await;
        if slot.generation.load(Ordering::Acquire) != ticket {
            tracing::debug!(path = %path, ticket, "docsync.diff.superseded");
            return DiffOutcome::Superseded;
        }
        DiffOutcome::Dispatched(self.dispatch(&pair, lcs).await)
    }

    /// Drop per-path bookkeeping once a path has no views left.
    pub fn forget(&self, path: &DocumentPath) {
        self.slots.lock().remove(path);
    }

    fn slot(&self, path: &DocumentPath) -> Arc<PathSlot> {
        Arc::clone(self.slots.lock().entry(path.clone()).or_default())
    }

    async fn compute(&self, pair: &DiffPair) -> SyncResult<LcsResult> {
        let (left, right) = join(self.render(&pair.left_uri), self.render(&pair.right_uri)).await;
        let a = extract_blocks(&left?);
        let b = extract_blocks(&right?);
        self.check_size(a.len())?;
        self.check_size(b.len())?;
        Ok(diff_with_stats(&a, &b))
    }

    async fn render(&self, uri: &DocumentUri) -> SyncResult<String> {
        self.renderer
            .render(uri)
            .await
            .map_err(|err| SyncError::render(uri, err))
    }

    fn check_size(&self, blocks: usize) -> SyncResult<()> {
        if blocks > self.config.max_blocks {
            return Err(SyncError::TooLarge {
                blocks,
                limit: self.config.max_blocks,
            });
        }
        Ok(())
    }

    async fn dispatch(&self, pair: &DiffPair, lcs: LcsResult) -> DispatchReport {
        let (left_set, right_set) = HighlightSet::split(DiffResult::from_runs(&lcs.runs));
        tracing::debug!(
            path = %pair.path,
            left = %pair.left,
            right = %pair.right,
            removed = lcs.stats.removed,
            added = lcs.stats.added,
            "docsync.diff.dispatch"
        );
        let left_delivered = self.deliver(&pair.path, pair.left, left_set).await;
        let right_delivered = self.deliver(&pair.path, pair.right, right_set).await;
        DispatchReport {
            left: pair.left,
            right: pair.right,
            stats: lcs.stats,
            left_delivered,
            right_delivered,
        }
    }

    async fn deliver(&self, path: &DocumentPath, view: ViewId, diffs: HighlightSet) -> bool {
        if !self.registry.is_member(path, view) {
            tracing::debug!(path = %path, view = %view, "docsync.diff.view_closed");
            return false;
        }
        match self.host.send(view, ViewMessage::highlight(diffs)).await {
            Ok(()) => true,
            Err(err) => {
                let err = SyncError::send(view, err);
                tracing::warn!(path = %path, error = %err, "docsync.diff.undelivered");
                false
            }
        }
    }
}
