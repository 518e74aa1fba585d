//! Error types for docsync.
//!
//! None of these cross the public boundary of the broadcaster, coordinator or
//! service. They are produced by internal steps and end up in a log event or
//! an outcome value.

use thiserror::Error;

use crate::id::{DocumentUri, ViewId};

/// Errors that can occur while synchronizing sibling views.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The view has no recorded URI (it was never registered, or it closed)
    #[error("no document uri recorded for {0}")]
    MissingUri(ViewId),

    /// The document renderer failed for a URI
    #[error("failed to render {uri}: {message}")]
    Render {
        /// URI that was being rendered
        uri: DocumentUri,
        /// Renderer's error message
        message: String,
    },

    /// The view host refused or failed to enqueue a message
    #[error("failed to deliver message to {view}: {message}")]
    Send {
        /// Target view
        view: ViewId,
        /// Host's error message
        message: String,
    },

    /// An inbound message could not be decoded
    #[error("invalid view message: {0}")]
    Decode(String),

    /// An extracted block sequence exceeds the configured diff limit
    #[error("diff input too large: {blocks} blocks exceeds limit of {limit}")]
    TooLarge {
        /// Number of blocks extracted
        blocks: usize,
        /// Configured limit
        limit: usize,
    },
}

/// Result type alias for docsync operations.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Create a render error from any displayable error.
    pub fn render(uri: &DocumentUri, err: impl std::fmt::Display) -> Self {
        Self::Render {
            uri: uri.clone(),
            message: err.to_string(),
        }
    }

    /// Create a delivery error from any displayable error.
    pub fn send(view: ViewId, err: impl std::fmt::Display) -> Self {
        Self::Send {
            view,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
