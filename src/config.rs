//! Runtime configuration.

/// Default maximum number of blocks per side before a diff is skipped.
const DEFAULT_MAX_BLOCKS: usize = 5000;

/// Configuration for diff triggers.
///
/// The LCS table holds `(|a| + 1) * (|b| + 1)` `u32` cells, about 100 MB at
/// the default limit. `max_blocks` bounds each extracted sequence and an
/// oversize input aborts the trigger like a render failure. This guard is
/// an addition of this crate: pass `usize::MAX` to [`DiffConfig::new`] to
/// diff inputs of any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Whether opening a second view computes a diff at all.
    /// Default: true
    pub enabled: bool,
    /// Maximum blocks per side.
    /// Default: 5000
    pub max_blocks: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_blocks: DEFAULT_MAX_BLOCKS,
        }
    }
}

impl DiffConfig {
    /// Create config with a custom block limit.
    pub fn new(max_blocks: usize) -> Self {
        Self {
            enabled: true,
            max_blocks,
        }
    }

    /// Config for very long documents (higher limit).
    pub fn large() -> Self {
        Self::new(10_000)
    }

    /// Config for constrained hosts (lower limit).
    pub fn small() -> Self {
        Self::new(1000)
    }

    /// Config with diffing turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Configuration for [`SyncService`](crate::service::SyncService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Forward scroll events to sibling views.
    pub scroll_sync: bool,
    /// Re-diff the remaining pair when a view closes and two or more are
    /// still open. Off by default: diffs are computed on open only.
    pub rediff_on_close: bool,
    pub diff: DiffConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            scroll_sync: true,
            rediff_on_close: false,
            diff: DiffConfig::default(),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scroll_sync(mut self, enabled: bool) -> Self {
        self.scroll_sync = enabled;
        self
    }

    pub fn with_rediff_on_close(mut self, enabled: bool) -> Self {
        self.rediff_on_close = enabled;
        self
    }

    pub fn with_diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert!(config.scroll_sync);
        assert!(!config.rediff_on_close);
        assert!(config.diff.enabled);
        assert_eq!(config.diff.max_blocks, DEFAULT_MAX_BLOCKS);
    }

    #[test]
    fn test_builders() {
        let config = SyncConfig::new()
            .with_scroll_sync(false)
            .with_rediff_on_close(true)
            .with_diff(DiffConfig::small());
        assert!(!config.scroll_sync);
        assert!(config.rediff_on_close);
        assert_eq!(config.diff.max_blocks, 1000);
        assert!(!DiffConfig::disabled().enabled);
        assert!(DiffConfig::large().max_blocks > DiffConfig::default().max_blocks);
    }
}
