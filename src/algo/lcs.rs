//! Longest Common Subsequence (LCS) Algorithm
//!
//! Computes a minimal kept/added/removed edit script between two block
//! sequences, compressed into runs.
//!
//! # Algorithm
//!
//! 1. Fill the LCS table: `dp[i][j]` is the LCS length of `a[..i]` and `b[..j]`
//! 2. Backtrack from `(|a|, |b|)` to `(0, 0)` emitting unit edits
//! 3. Reverse into forward order and merge adjacent units of the same kind
//!
//! On ties the backtrack moves along `b` first, so an ambiguous change reads
//! as "removed, then added" in forward order. Downstream highlighting depends
//! on this shape; keep it fixed.
//!
//! # Complexity
//!
//! - Time: O(|a| * |b|)
//! - Space: O(|a| * |b|) for the table
//!
//! Block counts are paragraph-scale (tens to low thousands), so the full
//! table is fine. Callers bound input size via `DiffConfig::max_blocks`.

/// Classification of an edit run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Present in both sequences
    Kept,
    /// Present only in `b`
    Added,
    /// Present only in `a`
    Removed,
}

/// A maximal run of same-classified units.
///
/// Only the count is kept; positions are recovered by walking runs in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRun {
    /// Classification shared by every unit in the run
    pub kind: EditKind,
    /// Number of units, at least 1
    pub len: usize,
}

impl EditRun {
    #[inline]
    pub const fn new(kind: EditKind, len: usize) -> Self {
        Self { kind, len }
    }

    /// Check if this is a Kept run
    pub fn is_kept(&self) -> bool {
        self.kind == EditKind::Kept
    }
}

/// Result of LCS diff operation
#[derive(Debug, Default)]
pub struct LcsResult {
    /// Runs in forward order
    pub runs: Vec<EditRun>,
    /// Statistics about the diff
    pub stats: LcsStats,
}

/// Statistics from LCS computation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LcsStats {
    /// Units in both sequences (the LCS length)
    pub kept: usize,
    /// Units only in `b`
    pub added: usize,
    /// Units only in `a`
    pub removed: usize,
}

impl LcsStats {
    /// Total number of non-kept units
    pub fn edit_count(&self) -> usize {
        self.added + self.removed
    }

    /// Check if there are no changes
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }

    fn record(&mut self, kind: EditKind) {
        match kind {
            EditKind::Kept => self.kept += 1,
            EditKind::Added => self.added += 1,
            EditKind::Removed => self.removed += 1,
        }
    }
}

/// Compute the run-length edit script turning `a` into `b`.
///
/// ```
/// use docsync::algo::{diff_sequences, EditKind, EditRun};
///
/// let runs = diff_sequences(&["a", "b"], &["b", "a"]);
/// assert_eq!(runs, [
///     EditRun::new(EditKind::Removed, 1),
///     EditRun::new(EditKind::Kept, 1),
///     EditRun::new(EditKind::Added, 1),
/// ]);
/// ```
pub fn diff_sequences<T: PartialEq>(a: &[T], b: &[T]) -> Vec<EditRun> {
    diff_with_stats(a, b).runs
}

/// Like [`diff_sequences`], also reporting unit counts.
pub fn diff_with_stats<T: PartialEq>(a: &[T], b: &[T]) -> LcsResult {
    if a.is_empty() && b.is_empty() {
        return LcsResult::default();
    }

    let dp = lcs_table(a, b);
    let mut units = Vec::with_capacity(a.len() + b.len());
    let mut i = a.len();
    let mut j = b.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            units.push(EditKind::Kept);
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            units.push(EditKind::Added);
            j -= 1;
        } else {
            units.push(EditKind::Removed);
            i -= 1;
        }
    }

    let mut result = LcsResult::default();
    for kind in units.into_iter().rev() {
        result.stats.record(kind);
        match result.runs.last_mut() {
            Some(run) if run.kind == kind => run.len += 1,
            _ => result.runs.push(EditRun::new(kind, 1)),
        }
    }
    result
}

/// Length of the longest common subsequence of `a` and `b`.
pub fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    lcs_table(a, b)[a.len()][b.len()] as usize
}

/// dp[i][j] = length of LCS of a[0..i] and b[0..j], as `u32` cells
fn lcs_table<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Vec<u32>> {
    let n = a.len();
    let m = b.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];

    for i in 1..=n {
        for j in 1..=m {
            if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }
    dp
}
