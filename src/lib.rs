//! docsync - Scroll Sync and Diff Highlighting for Sibling Document Views
//!
//! ## Core Concepts
//!
//! **Sibling views**: several live views of the same logical document (for
//! example the working copy and a git revision, side by side) share a
//! [`DocumentPath`]. Scrolling one scrolls the others, and the first two are
//! diffed block by block so each can highlight its own changes.
//!
//! ## Modules
//! - `id`: `ViewId`, `DocumentUri`, `DocumentPath`
//! - `extract`: HTML to text blocks (and the heading outline)
//! - `algo`: LCS diff and per-view index remapping
//! - `registry`: which views show which document
//! - `broadcast`: scroll propagation
//! - `coordinator`: render, diff and highlight a pair of views
//! - `service`: host-facing façade over all of the above
//! - `message`: wire format of view messages
//! - `host`: renderer and view host traits
//!
//! ## Usage
//!
//! ```ignore
//! use docsync::{SyncService, DocumentUri, ViewId};
//!
//! let service = SyncService::new(my_renderer, my_webview_host);
//!
//! // Host lifecycle events
//! service.on_open_uri(ViewId::from_raw(1), DocumentUri::new("file:///r.docx")).await;
//! service.on_open_uri(ViewId::from_raw(2), DocumentUri::new("git:/r.docx?ref=HEAD")).await;
//!
//! // Messages posted by a view
//! service.on_raw_message(ViewId::from_raw(1), r#"{"command":"scroll","scrollPercent":0.4}"#).await;
//!
//! service.on_close(ViewId::from_raw(2)).await;
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Identity types
pub mod id;

/// Block and outline extraction
pub mod extract;

/// Algorithms: LCS diff, highlight remapping
pub mod algo;

/// Panel registry
pub mod registry;

/// Scroll broadcaster
pub mod broadcast;

/// Diff coordinator
pub mod coordinator;

/// Host-facing service
pub mod service;

/// View message codec
pub mod message;

/// Collaborator traits
pub mod host;

/// Configuration
pub mod config;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use id::{DocumentPath, DocumentUri, ViewId};

pub use extract::{extract_blocks, extract_outline, OutlineItem, TextBlock};

pub use algo::{diff_sequences, DiffResult, EditKind, EditRun, LcsStats};

pub use registry::{PanelRegistry, ViewGroup};

pub use broadcast::ScrollBroadcaster;

pub use coordinator::{DiffCoordinator, DiffOutcome, DispatchReport};

pub use service::SyncService;

pub use message::{HighlightSet, ScrollFraction, ViewEvent, ViewMessage};

pub use host::{DocumentRenderer, ViewHost};

pub use config::{DiffConfig, SyncConfig};

pub use error::{SyncError, SyncResult};
