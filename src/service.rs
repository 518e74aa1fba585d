//! Service façade wiring the core to view host events.
//!
//! The host calls into [`SyncService`] at three points:
//! - a view opened: [`SyncService::on_open`]
//! - a view closed: [`SyncService::on_close`]
//! - a view posted a message: [`SyncService::on_raw_message`] or
//!   [`SyncService::on_event`]
//!
//! The service owns the registry for the lifetime of the session; dropping
//! it drops all view bookkeeping.

use std::sync::Arc;

use crate::broadcast::ScrollBroadcaster;
use crate::config::SyncConfig;
use crate::coordinator::{DiffCoordinator, DiffOutcome};
use crate::host::{DocumentRenderer, ViewHost};
use crate::id::{DocumentPath, DocumentUri, ViewId};
use crate::message::ViewEvent;
use crate::registry::PanelRegistry;

/// Scroll sync and diff highlighting for one application session.
pub struct SyncService<R, H> {
    registry: PanelRegistry,
    broadcaster: ScrollBroadcaster<H>,
    coordinator: DiffCoordinator<R, H>,
    config: SyncConfig,
}

impl<R: DocumentRenderer, H: ViewHost> SyncService<R, H> {
    /// Create a service with default config.
    pub fn new(renderer: R, host: H) -> Self {
        Self::with_config(renderer, host, SyncConfig::default())
    }

    pub fn with_config(renderer: R, host: H, config: SyncConfig) -> Self {
        let registry = PanelRegistry::new();
        let host = Arc::new(host);
        let broadcaster = ScrollBroadcaster::new(registry.clone(), Arc::clone(&host));
        let coordinator = DiffCoordinator::new(registry.clone(), Arc::new(renderer), host, config.diff);
        Self {
            registry,
            broadcaster,
            coordinator,
            config,
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Register a newly opened view and diff its group if it now has
    /// siblings.
    ///
    /// Every open with two or more views re-diffs the first two.
    pub async fn on_open(&self, path: DocumentPath, view: ViewId, uri: DocumentUri) -> DiffOutcome {
        let members = self.registry.register_view(path.clone(), view, uri);
        if members < 2 {
            return DiffOutcome::NotEnoughViews;
        }
        self.coordinator.maybe_trigger_diff(&path).await
    }

    /// Like [`on_open`](Self::on_open), deriving the sibling key from the URI.
    pub async fn on_open_uri(&self, view: ViewId, uri: DocumentUri) -> DiffOutcome {
        let path = DocumentPath::from_uri(&uri);
        self.on_open(path, view, uri).await
    }

    /// Unregister a closed view.
    ///
    /// Returns the re-diff outcome when `rediff_on_close` is set and the
    /// group still has a pair, `None` otherwise.
    pub async fn on_close(&self, view: ViewId) -> Option<DiffOutcome> {
        let path = self.registry.unregister_view(view)?;
        let remaining = self.registry.group_of(&path).map_or(0, |group| group.len());
        if remaining == 0 {
            self.coordinator.forget(&path);
            return None;
        }
        if self.config.rediff_on_close && remaining >= 2 {
            return Some(self.coordinator.maybe_trigger_diff(&path).await);
        }
        None
    }

    /// Handle a decoded event from `view`.
    pub async fn on_event(&self, view: ViewId, event: ViewEvent) {
        match event {
            ViewEvent::Scroll { fraction } => {
                if self.config.scroll_sync {
                    self.broadcaster.broadcast_scroll(view, fraction).await;
                }
            }
            ViewEvent::Error { message } => {
                let detail = message.as_deref().unwrap_or("unknown error");
                tracing::warn!(view = %view, detail, "docsync.view.error");
            }
            ViewEvent::Info { message: Some(message) } => {
                tracing::info!(view = %view, detail = %message, "docsync.view.info");
            }
            ViewEvent::Info { message: None } => {}
        }
    }

    /// Decode a raw payload from `view` and handle it.
    ///
    /// Undecodable payloads are logged and dropped.
    pub async fn on_raw_message(&self, view: ViewId, raw: &str) {
        match ViewEvent::decode(raw) {
            Ok(event) => self.on_event(view, event).await,
            Err(err) => tracing::debug!(view = %view, error = %err, "docsync.view.undecodable"),
        }
    }
}
