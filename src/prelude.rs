//! Prelude module for common imports.
//!
//! ```ignore
//! use docsync::prelude::*;
//! ```

// Identity
pub use crate::id::{DocumentPath, DocumentUri, ViewId};

// Extraction
pub use crate::extract::{extract_blocks, extract_outline, OutlineItem, TextBlock};

// Algorithms
pub use crate::algo::{
    diff_sequences, diff_with_stats, lcs_len, DiffResult, EditKind, EditRun, LcsResult, LcsStats,
};

// Registry and coordination
pub use crate::broadcast::ScrollBroadcaster;
pub use crate::coordinator::{DiffCoordinator, DiffOutcome, DispatchReport};
pub use crate::registry::{DiffPair, PanelRegistry, ViewGroup};
pub use crate::service::SyncService;

// Messages and collaborators
pub use crate::host::{DocumentRenderer, ViewHost};
pub use crate::message::{HighlightSet, ScrollFraction, ViewEvent, ViewMessage};

// Config
pub use crate::config::{DiffConfig, SyncConfig};

// Error
pub use crate::error::{SyncError, SyncResult};
