//! Scroll propagation between sibling views.

use std::sync::Arc;

use futures_util::future::join_all;
use smallvec::SmallVec;

use crate::host::ViewHost;
use crate::id::ViewId;
use crate::message::{ScrollFraction, ViewMessage};
use crate::registry::PanelRegistry;

/// Forwards a view's scroll position to every other view of its group.
///
/// Fire-and-forget: a failed send is logged and the rest still go out.
pub struct ScrollBroadcaster<H> {
    registry: PanelRegistry,
    host: Arc<H>,
}

impl<H: ViewHost> ScrollBroadcaster<H> {
    pub fn new(registry: PanelRegistry, host: Arc<H>) -> Self {
        Self { registry, host }
    }

    /// Send `fraction` to all siblings of `source`.
    ///
    /// Returns how many siblings the message was enqueued for. Unregistered
    /// views and single-view groups are a no-op.
    pub async fn broadcast_scroll(&self, source: ViewId, fraction: ScrollFraction) -> usize {
        let Some(group) = self.registry.group_for(source) else {
            tracing::trace!(view = %source, "docsync.scroll.unregistered");
            return 0;
        };
        let targets: SmallVec<[ViewId; 4]> = group.into_iter().filter(|view| *view != source).collect();
        if targets.is_empty() {
            return 0;
        }

        let sends = targets.iter().map(|&view| async move {
            let result = self.host.send(view, ViewMessage::sync_scroll(fraction)).await;
            (view, result)
        });

        let mut delivered = 0;
        for (view, result) in join_all(sends).await {
            match result {
                Ok(()) => delivered += 1,
                Err(err) => tracing::debug!(view = %view, error = %err, "docsync.scroll.undelivered"),
            }
        }
        delivered
    }
}
