//! In-memory collaborators for tests.

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::host::{DocumentRenderer, ViewHost};
use crate::id::{DocumentUri, ViewId};
use crate::message::{HighlightSet, ScrollFraction, ViewMessage};

type RenderHook = Box<dyn Fn(&DocumentUri) + Send + Sync>;

/// Renderer serving fixed HTML per URI.
#[derive(Default)]
pub(crate) struct MemoryRenderer {
    pages: Mutex<FxHashMap<DocumentUri, Result<String, String>>>,
    calls: Mutex<Vec<DocumentUri>>,
    hook: Mutex<Option<RenderHook>>,
}

impl MemoryRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(self, uri: &str, html: &str) -> Self {
        self.pages.lock().insert(DocumentUri::new(uri), Ok(html.to_string()));
        self
    }

    pub(crate) fn with_failure(self, uri: &str, message: &str) -> Self {
        self.pages.lock().insert(DocumentUri::new(uri), Err(message.to_string()));
        self
    }

    /// Run `hook` at the start of every render call.
    pub(crate) fn set_hook(&self, hook: impl Fn(&DocumentUri) + Send + Sync + 'static) {
        *self.hook.lock() = Some(Box::new(hook));
    }

    pub(crate) fn calls(&self) -> Vec<DocumentUri> {
        self.calls.lock().clone()
    }
}

impl DocumentRenderer for MemoryRenderer {
    type Error = String;

    async fn render(&self, uri: &DocumentUri) -> Result<String, Self::Error> {
        if let Some(hook) = self.hook.lock().as_ref() {
            hook(uri);
        }
        self.calls.lock().push(uri.clone());
        self.pages
            .lock()
            .get(uri)
            .cloned()
            .unwrap_or_else(|| Err(format!("no page for {uri}")))
    }
}

/// Host that records every message it is asked to deliver.
#[derive(Default)]
pub(crate) struct RecordingHost {
    sent: Mutex<Vec<(ViewId, ViewMessage)>>,
    failing: Mutex<FxHashSet<ViewId>>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every send to `view` fail.
    pub(crate) fn fail_for(&self, view: ViewId) {
        self.failing.lock().insert(view);
    }

    pub(crate) fn sent(&self) -> Vec<(ViewId, ViewMessage)> {
        self.sent.lock().clone()
    }

    pub(crate) fn messages_for(&self, view: ViewId) -> Vec<ViewMessage> {
        self.sent
            .lock()
            .iter()
            .filter(|(target, _)| *target == view)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub(crate) fn highlights_for(&self, view: ViewId) -> Vec<HighlightSet> {
        self.messages_for(view)
            .into_iter()
            .filter_map(|message| match message {
                ViewMessage::Highlight { diffs } => Some(diffs),
                ViewMessage::SyncScroll { .. } => None,
            })
            .collect()
    }

    pub(crate) fn scrolls_for(&self, view: ViewId) -> Vec<ScrollFraction> {
        self.messages_for(view)
            .into_iter()
            .filter_map(|message| match message {
                ViewMessage::SyncScroll { fraction } => Some(fraction),
                ViewMessage::Highlight { .. } => None,
            })
            .collect()
    }
}

impl ViewHost for RecordingHost {
    type Error = String;

    async fn send(&self, view: ViewId, message: ViewMessage) -> Result<(), Self::Error> {
        if self.failing.lock().contains(&view) {
            return Err(format!("{view} is gone"));
        }
        self.sent.lock().push((view, message));
        Ok(())
    }
}
